use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::config::Config;
use crate::tui::app::SearchRequest;
use crate::tui::widgets::color::parse_color;

/// Submitted searches, newest first
pub fn render_results(f: &mut Frame, area: Rect, submissions: &[SearchRequest], config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let style = Style::default().fg(fg_color).bg(bg_color);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Searches ({})", submissions.len()))
        .style(style);

    if submissions.is_empty() {
        let empty = Paragraph::new("No searches yet")
            .block(block)
            .style(style.add_modifier(Modifier::DIM));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = submissions
        .iter()
        .rev()
        .map(|request| {
            let tags = if request.tags.is_empty() {
                Span::styled("(no tags)", Style::default().add_modifier(Modifier::ITALIC))
            } else {
                Span::raw(request.tags.clone())
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}  ", request.submitted_at), Style::default().add_modifier(Modifier::DIM)),
                tags,
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block).style(style), area);
}
