//! Scrawl Application
//!
//! Native demo host: a window standing in for a document view, with the
//! drawing overlay toggled on top of it.

mod app;
mod host;

pub use app::{App, AppConfig, TOGGLE_HINT};
pub use host::WindowHost;
