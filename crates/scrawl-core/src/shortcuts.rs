//! Desktop keyboard shortcuts.

use crate::fade::FadeMode;
use crate::input::KeyInput;
use crate::stroke::{StrokeColor, PRESET_WIDTHS};
use winit::keyboard::{Key, NamedKey};

/// Something the user asked the overlay to do, from a key or a toolbar button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayAction {
    SetColor(StrokeColor),
    SetWidth(f64),
    AdjustWidth(f64),
    SetFadeMode(FadeMode),
    CycleFadeMode,
    Clear,
    Exit,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
    pub action: OverlayAction,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str, action: OverlayAction) -> Self {
        Self {
            key,
            ctrl,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+ArrowUp").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

const DIGITS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Registry of the overlay's keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = StrokeColor::ALL
            .iter()
            .map(|&color| Shortcut::new(color.label(), false, color_description(color), OverlayAction::SetColor(color)))
            .collect();
        shortcuts.extend(
            DIGITS
                .iter()
                .zip(PRESET_WIDTHS)
                .map(|(&key, width)| Shortcut::new(key, false, width_description(key), OverlayAction::SetWidth(width))),
        );
        shortcuts.extend([
            Shortcut::new("F", false, "Cycle fade mode", OverlayAction::CycleFadeMode),
            Shortcut::new("E", false, "Erase all strokes", OverlayAction::Clear),
            Shortcut::new("Escape", false, "Exit drawing overlay", OverlayAction::Exit),
            Shortcut::new("ArrowUp", true, "Increase stroke width", OverlayAction::AdjustWidth(1.0)),
            Shortcut::new("ArrowDown", true, "Decrease stroke width", OverlayAction::AdjustWidth(-1.0)),
        ]);
        shortcuts
    }

    /// Find the action bound to a key press.
    ///
    /// Single-key bindings only fire without Ctrl, Alt or Meta held, so host
    /// shortcuts pass through.
    pub fn resolve(input: &KeyInput) -> Option<OverlayAction> {
        let modifier = input.modifiers.ctrl || input.modifiers.meta;
        let name = key_name(&input.key)?;

        if modifier {
            return match name.as_str() {
                "arrowup" => Some(OverlayAction::AdjustWidth(1.0)),
                "arrowdown" => Some(OverlayAction::AdjustWidth(-1.0)),
                _ => None,
            };
        }
        if input.modifiers.alt {
            return None;
        }

        Self::all()
            .into_iter()
            .find(|shortcut| !shortcut.ctrl && shortcut.key.eq_ignore_ascii_case(&name))
            .map(|shortcut| shortcut.action)
    }

    /// Log all shortcuts.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:14} {}", shortcut.format(), shortcut.description);
        }
    }
}

fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_lowercase()),
        Key::Named(NamedKey::Escape) => Some("escape".to_string()),
        Key::Named(NamedKey::ArrowUp) => Some("arrowup".to_string()),
        Key::Named(NamedKey::ArrowDown) => Some("arrowdown".to_string()),
        _ => None,
    }
}

fn color_description(color: StrokeColor) -> &'static str {
    match color {
        StrokeColor::Red => "Red pen",
        StrokeColor::Yellow => "Yellow pen",
        StrokeColor::Blue => "Blue pen",
        StrokeColor::Green => "Green pen",
        StrokeColor::Orange => "Orange pen",
        StrokeColor::Pink => "Pink pen",
    }
}

fn width_description(key: &str) -> &'static str {
    match key {
        "1" => "Width 2",
        "2" => "Width 4",
        "3" => "Width 8",
        "4" => "Width 12",
        _ => "Width 16",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn key(c: &str) -> KeyInput {
        KeyInput::character(c)
    }

    #[test]
    fn test_color_keys() {
        assert_eq!(ShortcutRegistry::resolve(&key("r")), Some(OverlayAction::SetColor(StrokeColor::Red)));
        assert_eq!(ShortcutRegistry::resolve(&key("P")), Some(OverlayAction::SetColor(StrokeColor::Pink)));
        assert_eq!(ShortcutRegistry::resolve(&key("o")), Some(OverlayAction::SetColor(StrokeColor::Orange)));
    }

    #[test]
    fn test_width_presets() {
        assert_eq!(ShortcutRegistry::resolve(&key("1")), Some(OverlayAction::SetWidth(2.0)));
        assert_eq!(ShortcutRegistry::resolve(&key("4")), Some(OverlayAction::SetWidth(12.0)));
        assert_eq!(ShortcutRegistry::resolve(&key("5")), Some(OverlayAction::SetWidth(16.0)));
        assert_eq!(ShortcutRegistry::resolve(&key("6")), None);
    }

    #[test]
    fn test_actions() {
        assert_eq!(ShortcutRegistry::resolve(&key("f")), Some(OverlayAction::CycleFadeMode));
        assert_eq!(ShortcutRegistry::resolve(&key("e")), Some(OverlayAction::Clear));
        let escape = KeyInput::new(Key::Named(NamedKey::Escape), Modifiers::NONE);
        assert_eq!(ShortcutRegistry::resolve(&escape), Some(OverlayAction::Exit));
    }

    #[test]
    fn test_ctrl_arrows_adjust_width() {
        let up = KeyInput::new(Key::Named(NamedKey::ArrowUp), Modifiers::CTRL);
        let down = KeyInput::new(Key::Named(NamedKey::ArrowDown), Modifiers::CTRL);
        assert_eq!(ShortcutRegistry::resolve(&up), Some(OverlayAction::AdjustWidth(1.0)));
        assert_eq!(ShortcutRegistry::resolve(&down), Some(OverlayAction::AdjustWidth(-1.0)));

        let plain_up = KeyInput::new(Key::Named(NamedKey::ArrowUp), Modifiers::NONE);
        assert_eq!(ShortcutRegistry::resolve(&plain_up), None);
    }

    #[test]
    fn test_unbound_and_modified_keys_pass_through() {
        assert_eq!(ShortcutRegistry::resolve(&key("x")), None);
        let ctrl_r = KeyInput::new(Key::Character("r".into()), Modifiers::CTRL);
        assert_eq!(ShortcutRegistry::resolve(&ctrl_r), None);
        let tab = KeyInput::new(Key::Named(NamedKey::Tab), Modifiers::NONE);
        assert_eq!(ShortcutRegistry::resolve(&tab), None);
    }

    #[test]
    fn test_format() {
        let all = ShortcutRegistry::all();
        assert_eq!(all.len(), 16);
        assert!(all.iter().any(|s| s.format() == "Ctrl+ArrowUp"));
    }
}
