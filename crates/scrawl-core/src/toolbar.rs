//! Touch toolbar model used on mobile, where there is no keyboard.
//!
//! The host draws the buttons; this type decides which buttons exist, which
//! one is highlighted, and what pressing each one does.

use crate::fade::FadeMode;
use crate::shortcuts::OverlayAction;
use crate::stroke::StrokeColor;

/// Widths offered by the toolbar.
pub const TOOLBAR_WIDTHS: [f64; 3] = [2.0, 4.0, 8.0];

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarButton {
    Width(f64),
    Color(StrokeColor),
    Fade,
    Clear,
    Exit,
}

/// State of the mobile toolbar.
#[derive(Debug, Clone)]
pub struct ToolbarState {
    width: f64,
    fade_mode: FadeMode,
}

impl ToolbarState {
    pub fn new(width: f64, fade_mode: FadeMode) -> Self {
        Self { width, fade_mode }
    }

    /// Buttons grouped as laid out: widths, colors, fade, actions.
    pub fn groups(&self) -> Vec<Vec<ToolbarButton>> {
        vec![
            TOOLBAR_WIDTHS.iter().map(|&w| ToolbarButton::Width(w)).collect(),
            StrokeColor::ALL.iter().map(|&c| ToolbarButton::Color(c)).collect(),
            vec![ToolbarButton::Fade],
            vec![ToolbarButton::Clear, ToolbarButton::Exit],
        ]
    }

    /// Text shown on a button.
    pub fn label(&self, button: ToolbarButton) -> String {
        match button {
            ToolbarButton::Width(_) => "━".to_string(),
            ToolbarButton::Color(color) => color.label().to_string(),
            ToolbarButton::Fade => self.fade_mode.label(),
            ToolbarButton::Clear => "Clear".to_string(),
            ToolbarButton::Exit => "Exit".to_string(),
        }
    }

    /// Whether a width button matches the current width.
    pub fn is_active(&self, button: ToolbarButton) -> bool {
        matches!(button, ToolbarButton::Width(w) if (w - self.width).abs() < f64::EPSILON)
    }

    /// Handle a tap and return the action for the overlay.
    pub fn press(&mut self, button: ToolbarButton) -> OverlayAction {
        match button {
            ToolbarButton::Width(width) => {
                self.width = width;
                OverlayAction::SetWidth(width)
            }
            ToolbarButton::Color(color) => OverlayAction::SetColor(color),
            ToolbarButton::Fade => {
                self.fade_mode = self.fade_mode.next();
                OverlayAction::SetFadeMode(self.fade_mode)
            }
            ToolbarButton::Clear => OverlayAction::Clear,
            ToolbarButton::Exit => OverlayAction::Exit,
        }
    }

    /// Mirror a width change made elsewhere.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Mirror a fade mode change made elsewhere.
    pub fn set_fade_mode(&mut self, mode: FadeMode) {
        self.fade_mode = mode;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn fade_mode(&self) -> FadeMode {
        self.fade_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let toolbar = ToolbarState::new(4.0, FadeMode::Off);
        let groups = toolbar.groups();
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 6);
        assert!(toolbar.is_active(ToolbarButton::Width(4.0)));
        assert!(!toolbar.is_active(ToolbarButton::Width(2.0)));
        assert!(!toolbar.is_active(ToolbarButton::Clear));
    }

    #[test]
    fn test_width_press_moves_highlight() {
        let mut toolbar = ToolbarState::new(4.0, FadeMode::Off);
        assert_eq!(toolbar.press(ToolbarButton::Width(8.0)), OverlayAction::SetWidth(8.0));
        assert!(toolbar.is_active(ToolbarButton::Width(8.0)));
        assert!(!toolbar.is_active(ToolbarButton::Width(4.0)));
    }

    #[test]
    fn test_fade_button_cycles() {
        let mut toolbar = ToolbarState::new(4.0, FadeMode::Off);
        assert_eq!(toolbar.label(ToolbarButton::Fade), "🎨 Drawing (Fade: Off)");
        assert_eq!(toolbar.press(ToolbarButton::Fade), OverlayAction::SetFadeMode(FadeMode::Fading));
        assert_eq!(toolbar.label(ToolbarButton::Fade), "🎨 Drawing (Fade: 1s)");
    }

    #[test]
    fn test_other_buttons() {
        let mut toolbar = ToolbarState::new(4.0, FadeMode::Off);
        assert_eq!(toolbar.press(ToolbarButton::Color(StrokeColor::Blue)), OverlayAction::SetColor(StrokeColor::Blue));
        assert_eq!(toolbar.press(ToolbarButton::Clear), OverlayAction::Clear);
        assert_eq!(toolbar.press(ToolbarButton::Exit), OverlayAction::Exit);
        assert_eq!(toolbar.label(ToolbarButton::Color(StrokeColor::Yellow)), "Y");
    }
}
