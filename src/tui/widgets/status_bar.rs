use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// One-line status bar: the current message if there is one, otherwise as
/// many key hints as fit.
pub fn render_status_bar(f: &mut Frame, area: Rect, message: Option<&str>, key_hints: &[String], config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let max_width = usize::from(area.width);

    let (content, style) = match message {
        Some(msg) => (
            truncate(msg, max_width),
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => (fit_hints(key_hints, max_width), Style::default().fg(fg_color).bg(bg_color)),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Join hints with bullets, stopping with an ellipsis at the first one that
/// no longer fits
pub fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let separator_len = SEPARATOR.chars().count();
    let mut text = String::new();
    let mut len = 0;

    for (i, hint) in key_hints.iter().enumerate() {
        let hint_len = hint.chars().count();
        let next_len = if i == 0 { hint_len } else { len + separator_len + hint_len };

        if next_len > max_width {
            if i == 0 {
                return truncate(hint, max_width);
            }
            if len + ELLIPSIS.len() > max_width {
                text = text.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect();
            }
            text.push_str(ELLIPSIS);
            return text;
        }

        if i > 0 {
            text.push_str(SEPARATOR);
        }
        text.push_str(hint);
        len = next_len;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["Tab: Next".to_string(), "Ctrl+s: Search".to_string(), "F1: Help".to_string()]
    }

    #[test]
    fn all_hints_fit_on_a_wide_bar() {
        assert_eq!(fit_hints(&hints(), 80), "Tab: Next • Ctrl+s: Search • F1: Help");
    }

    #[test]
    fn narrow_bar_ends_with_ellipsis() {
        assert_eq!(fit_hints(&hints(), 30), "Tab: Next • Ctrl+s: Search...");
        assert_eq!(fit_hints(&hints(), 28), "Tab: Next • Ctrl+s: Searc...");
        assert_eq!(fit_hints(&hints(), 6), "Tab...");
    }
}
