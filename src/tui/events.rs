use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::tui::app::{FormField, Mode};
use crate::tui::error::TuiError;
use crate::tui::{App, Layout};
use crate::utils::matches_key_event;

/// Restores the terminal even if the UI panics; a terminal left in raw mode
/// or on the alternate screen is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        guard.alternate_screen_enabled = true;
        Ok(guard)
    }

    /// Restore on normal exit; the guard does nothing on drop afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already cleaning up, nothing useful to do with errors here
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(app: &mut App) -> Result<(), TuiError> {
    // Checked before entering the alternate screen so the message stays readable
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    loop {
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let layout = Layout::calculate(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| crate::tui::render::render(f, app, &layout))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Press only; Windows also reports releases
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(app, key_event) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(app, mouse_event),
                _ => {}
            }
        }
    }

    guard.restore()?;
    Ok(())
}

/// Route one key press. Returns true when the app should quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> bool {
    match app.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Form => handle_form_mode(app, key_event),
    }
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> bool {
    if matches_key_event(key_event, &app.keys.quit) {
        return true;
    }
    if key_event.code == KeyCode::Esc || matches_key_event(key_event, &app.keys.help) {
        app.exit_help_mode();
    }
    false
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent) -> bool {
    if matches_key_event(key_event, &app.keys.quit) {
        return true;
    }
    if matches_key_event(key_event, &app.keys.help) {
        app.enter_help_mode();
        return false;
    }
    if matches_key_event(key_event, &app.keys.submit) {
        app.submit();
        return false;
    }
    if matches_key_event(key_event, &app.keys.clear) {
        app.clear_tags();
        return false;
    }

    // The focused tag field sees the key first; whatever it consumes stops here
    if app.focus == FormField::Tags {
        let outcome = app.tag_input.handle_key(key_event);
        if outcome.is_consumed() {
            debug!(?outcome, "key handled by tag field");
            return false;
        }
    }

    if matches_key_event(key_event, &app.keys.next_field) {
        app.navigate_field(true);
        return false;
    }

    match key_event.code {
        KeyCode::BackTab => app.navigate_field(false),
        KeyCode::Enter => app.activate_focused(),
        KeyCode::Esc => return true,
        _ => {}
    }
    false
}

pub fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
        app.handle_click(mouse_event.column, mouse_event.row);
    }
}
