//! Scrawl Render Library
//!
//! Drawing surfaces for the scrawl overlay.
//! The default implementation records strokes into a Vello scene.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderResult, RendererError, SurfaceGeometry};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
