use chrono::Utc;
use ratatui::layout::{Position, Rect};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::tui::error::TuiError;
use crate::tui::widgets::tag_input::{ClickOutcome, TagKeys, TagWidget};
use crate::utils::{parse_key_binding, ParsedKeyBinding};

const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Form,
    Help,
}

/// Focusable fields of the search form, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Tags,
    Search,
    Clear,
}

impl FormField {
    fn next(self, forward: bool) -> Self {
        match (self, forward) {
            (FormField::Tags, true) => FormField::Search,
            (FormField::Search, true) => FormField::Clear,
            (FormField::Clear, true) => FormField::Tags,
            (FormField::Tags, false) => FormField::Clear,
            (FormField::Search, false) => FormField::Tags,
            (FormField::Clear, false) => FormField::Search,
        }
    }
}

/// What the form sends when it is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// The serialized tag field, verbatim
    pub tags: String,
    pub submitted_at: String,
}

/// Host-level key bindings, parsed once at startup
#[derive(Debug, Clone)]
pub struct AppKeys {
    pub tags: TagKeys,
    pub submit: ParsedKeyBinding,
    pub clear: ParsedKeyBinding,
    pub next_field: ParsedKeyBinding,
    pub quit: ParsedKeyBinding,
    pub help: ParsedKeyBinding,
}

impl AppKeys {
    pub fn from_config(config: &Config) -> Result<Self, TuiError> {
        let bindings = &config.key_bindings;
        let parse = |s: &str| parse_key_binding(s).map_err(TuiError::KeyBindingError);
        Ok(Self {
            tags: TagKeys::from_config(config).map_err(TuiError::KeyBindingError)?,
            submit: parse(&bindings.submit)?,
            clear: parse(&bindings.clear)?,
            next_field: parse(&bindings.next_field)?,
            quit: parse(&bindings.quit)?,
            help: parse(&bindings.help)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

/// Screen areas from the last draw, used to route mouse clicks
#[derive(Debug, Clone, Copy, Default)]
pub struct FormAreas {
    pub tags: Rect,
    pub search: Rect,
    pub clear: Rect,
}

pub struct App {
    pub config: Config,
    pub keys: AppKeys,
    pub mode: Mode,
    pub focus: FormField,
    pub tag_input: TagWidget,
    pub submissions: Vec<SearchRequest>,
    pub status: StatusState,
    pub areas: FormAreas,
}

impl App {
    pub fn new(config: Config, seed: Option<&str>) -> Result<Self, TuiError> {
        let keys = AppKeys::from_config(&config)?;
        let tag_input = TagWidget::new(seed, keys.tags.clone());
        Ok(Self {
            config,
            keys,
            mode: Mode::Form,
            focus: FormField::Tags,
            tag_input,
            submissions: Vec::new(),
            status: StatusState::default(),
            areas: FormAreas::default(),
        })
    }

    /// Submit the form. Only the serialized field is read; whatever is still
    /// typed in the input is not part of the request.
    pub fn submit(&mut self) -> &SearchRequest {
        let tags = self.tag_input.serialized().to_string();
        let count = self.tag_input.tags().len();
        let request = SearchRequest {
            tags: tags.clone(),
            submitted_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        info!(tags = %request.tags, count, "search submitted");

        // The server answers with the same form, prefilled from what it received
        self.tag_input = TagWidget::new(Some(&tags), self.keys.tags.clone());
        if self.areas.tags.width > 2 && self.areas.tags.height > 2 {
            self.tag_input.set_area(tags_inner(self.areas.tags));
        }

        self.set_status_message(format!("Search submitted ({} tags)", count));
        self.submissions.push(request);
        &self.submissions[self.submissions.len() - 1]
    }

    pub fn clear_tags(&mut self) {
        let count = self.tag_input.tags().len();
        self.tag_input.clear();
        debug!(count, "tags cleared");
        if count > 0 {
            self.set_status_message("Tags cleared".to_string());
        }
    }

    pub fn navigate_field(&mut self, forward: bool) {
        self.focus = self.focus.next(forward);
    }

    /// Enter that the focused field left alone
    pub fn activate_focused(&mut self) {
        match self.focus {
            FormField::Tags | FormField::Search => {
                self.submit();
            }
            FormField::Clear => self.clear_tags(),
        }
    }

    /// Route a left click. A click on a chip's remove control is fully
    /// handled by the widget and never reaches the tags box focus behavior.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.mode != Mode::Form {
            return;
        }
        let pos = Position::new(column, row);

        if self.areas.tags.contains(pos) {
            if let ClickOutcome::Removed(tag) = self.tag_input.handle_click(column, row) {
                debug!(tag = %tag, "tag removed by click");
                return;
            }
            self.focus = FormField::Tags;
        } else if self.areas.search.contains(pos) {
            self.focus = FormField::Search;
            self.submit();
        } else if self.areas.clear.contains(pos) {
            self.focus = FormField::Clear;
            self.clear_tags();
        }
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.mode = Mode::Form;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }
}

/// Inside of the bordered tags box
pub fn tags_inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(seed: Option<&str>) -> App {
        App::new(Config::default(), seed).unwrap()
    }

    #[test]
    fn submit_reads_the_serialized_field_and_reseeds() {
        let mut app = app(Some("Beach, Resort"));
        let request = app.submit().clone();
        assert_eq!(request.tags, "beach,resort");
        assert_eq!(request.submitted_at.len(), "2024-01-01 00:00:00".len());
        assert_eq!(app.tag_input.tags(), ["beach", "resort"]);
        assert_eq!(app.status.message.as_deref(), Some("Search submitted (2 tags)"));
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut app = app(None);
        app.navigate_field(true);
        assert_eq!(app.focus, FormField::Search);
        app.navigate_field(true);
        app.navigate_field(true);
        assert_eq!(app.focus, FormField::Tags);
        app.navigate_field(false);
        assert_eq!(app.focus, FormField::Clear);
    }

    #[test]
    fn enter_on_clear_removes_every_tag() {
        let mut app = app(Some("a,b"));
        app.focus = FormField::Clear;
        app.activate_focused();
        assert!(app.tag_input.tags().is_empty());
        assert!(app.submissions.is_empty());
    }

    #[test]
    fn bad_binding_is_reported() {
        let mut config = Config::default();
        config.key_bindings.submit = "Hyper+x".to_string();
        assert!(matches!(App::new(config, None), Err(TuiError::KeyBindingError(_))));
    }

    #[test]
    fn remove_click_does_not_focus_the_tags_box() {
        let mut app = app(Some("beach,resort"));
        app.areas.tags = Rect::new(0, 0, 40, 5);
        app.tag_input.set_area(tags_inner(app.areas.tags));
        app.focus = FormField::Search;

        // " beach × " at inner column 1, glyph 7 cells in
        app.handle_click(1 + 7, 1);
        assert_eq!(app.tag_input.tags(), ["resort"]);
        assert_eq!(app.focus, FormField::Search);

        app.handle_click(30, 2);
        assert_eq!(app.focus, FormField::Tags);
    }

    #[test]
    fn status_message_expires() {
        let mut app = app(None);
        app.set_status_message("hello".to_string());
        app.check_status_message_timeout();
        assert!(app.status.message.is_some());

        app.status.message_time = Instant::now().checked_sub(std::time::Duration::from_secs(5));
        app.check_status_message_timeout();
        assert!(app.status.message.is_none());
    }
}
