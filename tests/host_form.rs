use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tagcart::tui::{self, App, FormField, Layout, Mode};
use tagcart::Config;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn app(seed: Option<&str>) -> App {
    App::new(Config::default(), seed).unwrap()
}

fn key(app: &mut App, code: KeyCode) -> bool {
    tui::handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(app: &mut App, ch: char) -> bool {
    tui::handle_key_event(app, KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        key(app, KeyCode::Char(ch));
    }
}

fn click(app: &mut App, column: u16, row: u16) {
    tui::handle_mouse_event(
        app,
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
    );
}

fn draw(app: &mut App) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let layout = Layout::calculate(Rect::new(0, 0, WIDTH, HEIGHT));
    terminal.draw(|f| tui::render(f, app, &layout)).unwrap();
    terminal
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect()
}

#[test]
fn enter_in_the_tag_field_never_submits_the_form() {
    let mut app = app(None);
    type_text(&mut app, "Historical,");
    assert!(app.submissions.is_empty());
    assert_eq!(app.tag_input.tags(), ["historical"]);
    assert!(app.tag_input.input().is_empty());

    type_text(&mut app, "Old Town");
    assert!(!key(&mut app, KeyCode::Enter));
    assert!(app.submissions.is_empty());

    // whitespace-only Enter is swallowed too
    type_text(&mut app, "  ");
    key(&mut app, KeyCode::Enter);
    assert!(app.submissions.is_empty());
    assert_eq!(app.tag_input.serialized(), "historical,old town");
}

#[test]
fn enter_on_search_submits_the_serialized_field() {
    let mut app = app(None);
    type_text(&mut app, "beach,resort,");
    key(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, FormField::Search);

    key(&mut app, KeyCode::Enter);
    assert_eq!(app.submissions.len(), 1);
    assert_eq!(app.submissions[0].tags, "beach,resort");
    // the reloaded form shows the same tags
    assert_eq!(app.tag_input.tags(), ["beach", "resort"]);
    assert_eq!(app.status.message.as_deref(), Some("Search submitted (2 tags)"));
}

#[test]
fn submit_binding_ignores_text_still_in_the_input() {
    let mut app = app(Some("spa"));
    type_text(&mut app, "museum");
    ctrl(&mut app, 's');
    assert_eq!(app.submissions[0].tags, "spa");
}

#[test]
fn backspace_and_clear_bindings_remove_tags() {
    let mut app = app(Some("a,b,c"));
    key(&mut app, KeyCode::Backspace);
    assert_eq!(app.tag_input.serialized(), "a,b");

    ctrl(&mut app, 'l');
    assert!(app.tag_input.tags().is_empty());
    assert_eq!(app.tag_input.serialized(), "");
}

#[test]
fn enter_on_clear_button_clears() {
    let mut app = app(Some("a,b"));
    key(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, FormField::Clear);
    key(&mut app, KeyCode::Enter);
    assert!(app.tag_input.tags().is_empty());
    assert!(app.submissions.is_empty());
}

#[test]
fn help_popup_opens_and_closes() {
    let mut app = app(None);
    key(&mut app, KeyCode::F(1));
    assert_eq!(app.mode, Mode::Help);

    // keys do nothing to the form while help is open
    type_text(&mut app, "x");
    assert!(app.tag_input.input().is_empty());
    assert!(!key(&mut app, KeyCode::Esc));
    assert_eq!(app.mode, Mode::Form);

    assert!(key(&mut app, KeyCode::Esc));
}

#[test]
fn quit_binding_exits_from_any_field() {
    let mut app = app(None);
    assert!(ctrl(&mut app, 'q'));
}

#[test]
fn renders_chips_buttons_and_results() {
    let mut app = app(Some("beach,resort"));
    let terminal = draw(&mut app);

    // tags box border is row 1, chips start on row 2 after two border columns
    let chips = row_text(&terminal, 2);
    assert!(chips.contains(&format!("{} {}", " beach × ", " resort × ")), "row was {:?}", chips);
    assert!(row_text(&terminal, 1).contains("> Tags:"));
    assert!(row_text(&terminal, 7).contains("Search"));
    assert!(row_text(&terminal, 7).contains("Clear"));
    assert!(row_text(&terminal, 10).contains("No searches yet"));
}

#[test]
fn clicking_a_chip_remove_glyph_does_not_move_focus() {
    let mut app = app(Some("beach,resort"));
    app.focus = FormField::Search;
    draw(&mut app);

    // " beach × " starts at column 2, its × is 7 cells in
    click(&mut app, 2 + 7, 2);
    assert_eq!(app.tag_input.tags(), ["resort"]);
    assert_eq!(app.focus, FormField::Search);
    assert!(app.submissions.is_empty());

    // an empty spot in the box focuses the tag field
    click(&mut app, 60, 3);
    assert_eq!(app.focus, FormField::Tags);
}

#[test]
fn clicking_buttons_activates_them() {
    let mut app = app(Some("beach"));
    draw(&mut app);
    let search = app.areas.search;
    let clear = app.areas.clear;

    click(&mut app, search.x + 1, search.y + 1);
    assert_eq!(app.submissions.len(), 1);
    assert_eq!(app.focus, FormField::Search);

    draw(&mut app);
    click(&mut app, clear.x + 1, clear.y + 1);
    assert!(app.tag_input.tags().is_empty());
    assert_eq!(app.focus, FormField::Clear);
}

#[test]
fn enter_in_the_tag_field_stays_put_when_confirm_is_rebound() {
    let mut config = Config::default();
    config.key_bindings.confirm_tag = "Ctrl+t".to_string();
    let mut app = App::new(config, None).unwrap();

    type_text(&mut app, "harbor");
    key(&mut app, KeyCode::Enter);
    assert!(app.submissions.is_empty());

    ctrl(&mut app, 't');
    assert_eq!(app.tag_input.tags(), ["harbor"]);
}
