use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display as display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);

    let popup = popup_area(area, 70, 80);
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}

/// Centered rect covering the given percentages of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn build_help_text(config: &Config) -> String {
    let keys = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Tags:\n");
    text.push_str(&format!(
        "  {} or '{}': Add the typed tag\n",
        display(&keys.confirm_tag),
        config.delimiter
    ));
    text.push_str(&format!("  {} on empty input: Remove the last tag\n", display(&keys.erase_tag)));
    text.push_str("  Click ×: Remove that tag\n");
    text.push_str("  Left/Right, Home/End: Move the cursor\n");
    text.push('\n');

    text.push_str("Form:\n");
    text.push_str(&format!("  {} / Shift+Tab: Next / previous field\n", display(&keys.next_field)));
    text.push_str("  Enter on Search: Submit\n");
    text.push_str("  Enter on Clear: Remove all tags\n");
    text.push_str(&format!("  {}: Submit from anywhere\n", display(&keys.submit)));
    text.push_str(&format!("  {}: Clear all tags\n", display(&keys.clear)));
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Show/hide help\n", display(&keys.help)));
    text.push_str(&format!("  {} / Esc: Quit\n", display(&keys.quit)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_bindings() {
        let mut config = Config::default();
        config.delimiter = ';';
        config.key_bindings.submit = "F5".to_string();

        let text = build_help_text(&config);
        assert!(text.contains("';': Add the typed tag"));
        assert!(text.contains("F5: Submit from anywhere"));
    }

    #[test]
    fn popup_is_centered() {
        let popup = popup_area(Rect::new(0, 0, 100, 50), 70, 80);
        assert_eq!(popup, Rect::new(15, 5, 70, 40));
    }
}
