use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::app::{FormField, Mode};
use crate::tui::widgets::{
    color::{get_contrast_text_color, parse_color},
    help::render_help,
    results::render_results,
    status_bar::render_status_bar,
    tag_input::render_tag_input,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let theme = app.config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Tagcart Search")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    app.areas.tags = layout.tags_area;
    app.areas.search = layout.search_area;
    app.areas.clear = layout.clear_area;

    let form_active = app.mode == Mode::Form;
    render_tag_input(
        f,
        layout.tags_area,
        &mut app.tag_input,
        form_active && app.focus == FormField::Tags,
        &app.config,
    );
    render_button(f, layout.search_area, "Search", form_active && app.focus == FormField::Search, app);
    render_button(f, layout.clear_area, "Clear", form_active && app.focus == FormField::Clear, app);
    render_results(f, layout.results_area, &app.submissions, &app.config);

    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_deref(), &key_hints, &app.config);
}

fn render_button(f: &mut Frame, area: Rect, label: &str, focused: bool, app: &App) {
    let theme = app.config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let style = if focused {
        Style::default()
            .fg(get_contrast_text_color(highlight_bg))
            .bg(highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg_color).bg(bg_color)
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(button, area);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let keys = &app.config.key_bindings;
    match app.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", display(&keys.help))],
        Mode::Form => {
            let mut hints = Vec::new();
            if app.focus == FormField::Tags {
                hints.push(format!("{}: Add tag", display(&keys.confirm_tag)));
                hints.push(format!("{}: Remove last", display(&keys.erase_tag)));
            } else {
                hints.push("Enter: Activate".to_string());
            }
            hints.push(format!("{}: Next field", display(&keys.next_field)));
            hints.push(format!("{}: Search", display(&keys.submit)));
            hints.push(format!("{}: Clear", display(&keys.clear)));
            hints.push(format!("{}: Help", display(&keys.help)));
            hints.push(format!("{}: Quit", display(&keys.quit)));
            hints
        }
    }
}
