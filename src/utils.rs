use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "tagcart-dev",
            Profile::Prod => "tagcart",
        }
    }
}

/// Get the configuration directory path
/// If profile is Dev, uses "tagcart-dev" instead of "tagcart"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "tagcart", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path (log file lives here)
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "tagcart", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Parsed key binding information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKeyBinding {
    pub key_code: KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
pub fn has_primary_modifier(modifiers: KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display, showing the platform-appropriate modifier
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports single keys ("q", ","), special keys ("Enter", "Backspace", "F1")
/// and the Ctrl modifier ("Ctrl+s")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        return Ok(ParsedKeyBinding {
            key_code: parse_key_code(key_part)?,
            requires_ctrl: true,
        });
    }

    Ok(ParsedKeyBinding {
        key_code: parse_key_code(key_str)?,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<KeyCode, String> {
    let code = match key_str {
        "Enter" => KeyCode::Enter,
        "Esc" | "Escape" => KeyCode::Esc,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Space" | " " => KeyCode::Char(' '),
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "Delete" => KeyCode::Delete,
        "Insert" => KeyCode::Insert,
        _ => {
            if let Some(n) = key_str.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
                return Err(format!("Unknown function key: {}", key_str));
            }
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                (None, _) => return Err("Empty key binding".to_string()),
                _ => return Err(format!("Unknown key binding: {}", key_str)),
            }
        }
    };
    Ok(code)
}

/// Check a key event against a parsed binding. Letter bindings match either case
/// so "Ctrl+s" still fires when the terminal reports Ctrl+S.
pub fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    if binding.requires_ctrl != has_primary_modifier(key_event.modifiers) {
        return false;
    }

    match (binding.key_code, key_event.code) {
        (KeyCode::Char(expected), KeyCode::Char(actual)) if binding.requires_ctrl => {
            expected.eq_ignore_ascii_case(&actual)
        }
        (expected, actual) => expected == actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_special_and_ctrl_bindings() {
        assert_eq!(
            parse_key_binding("Enter"),
            Ok(ParsedKeyBinding { key_code: KeyCode::Enter, requires_ctrl: false })
        );
        assert_eq!(
            parse_key_binding(" Ctrl+s "),
            Ok(ParsedKeyBinding { key_code: KeyCode::Char('s'), requires_ctrl: true })
        );
        assert_eq!(parse_key_binding("F1").map(|b| b.key_code), Ok(KeyCode::F(1)));
        assert_eq!(parse_key_binding(",").map(|b| b.key_code), Ok(KeyCode::Char(',')));
    }

    #[test]
    fn rejects_unknown_bindings() {
        assert!(parse_key_binding("Hyper+x").is_err());
        assert!(parse_key_binding("F13").is_err());
        assert!(parse_key_binding("").is_err());
    }

    #[test]
    fn matching_respects_the_ctrl_requirement() {
        let submit = parse_key_binding("Ctrl+s").unwrap();
        let enter = parse_key_binding("Enter").unwrap();

        assert!(matches_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &submit));
        assert!(matches_key_event(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL), &submit));
        assert!(!matches_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE), &submit));
        assert!(matches_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &enter));
        assert!(!matches_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL), &enter));
    }

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("/etc/tagcart.toml"), PathBuf::from("/etc/tagcart.toml"));
    }
}
