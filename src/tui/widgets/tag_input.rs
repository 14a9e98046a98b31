//! Tag entry widget: free-text input, removable chips and the serialized
//! field a host form submits.
//!
//! The [`TagSet`] is the single source of truth. Every mutation goes through
//! [`TagWidget::add`] or [`TagWidget::remove`], and both end in `sync`, which
//! rebuilds the chip list and the serialized field before returning. The
//! input is never part of that rebuild.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tracing::debug;

use crate::tags::{AddOutcome, TagSet};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::text_input::TextInput;
use crate::utils::{has_primary_modifier, matches_key_event, parse_key_binding, ParsedKeyBinding};
use crate::config::Config;

/// Columns the input needs after the last chip before it wraps to a new row
pub const MIN_INPUT_WIDTH: u16 = 10;

const REMOVE_GLYPH: &str = "×";

/// Keys the widget reacts to on its own
#[derive(Debug, Clone)]
pub struct TagKeys {
    pub confirm: ParsedKeyBinding,
    pub erase: ParsedKeyBinding,
    pub delimiter: char,
}

impl TagKeys {
    pub fn from_config(config: &Config) -> Result<Self, String> {
        Ok(Self {
            confirm: parse_key_binding(&config.key_bindings.confirm_tag)?,
            erase: parse_key_binding(&config.key_bindings.erase_tag)?,
            delimiter: config.delimiter,
        })
    }
}

impl Default for TagKeys {
    fn default() -> Self {
        Self {
            confirm: ParsedKeyBinding { key_code: KeyCode::Enter, requires_ctrl: false },
            erase: ParsedKeyBinding { key_code: KeyCode::Backspace, requires_ctrl: false },
            delimiter: crate::tags::DEFAULT_DELIMITER,
        }
    }
}

/// What a key press did. Everything except `Ignored` was consumed by the
/// widget and must not reach the host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKeyOutcome {
    Added(String),
    Duplicate(String),
    /// Confirm pressed with nothing usable in the input
    Empty,
    RemovedLast(String),
    /// Erase pressed on an empty input with no tags left
    NothingToErase,
    Edited,
    /// Plain Enter held back from the host form when confirm is rebound
    Suppressed,
    Ignored,
}

impl TagKeyOutcome {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, TagKeyOutcome::Ignored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A chip's remove control was hit; the click stops here
    Removed(String),
    /// Click landed on a chip body
    Chip(usize),
    Missed,
}

/// One rendered chip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub index: usize,
    pub label: String,
}

/// Position of a chip relative to the top-left of the chip area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    pub index: usize,
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl ChipSlot {
    /// Relative column of the remove glyph
    pub fn remove_x(&self) -> u16 {
        self.x + self.width.saturating_sub(2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipLayout {
    pub slots: Vec<ChipSlot>,
    pub input_x: u16,
    pub input_y: u16,
}

impl ChipLayout {
    pub fn rows(&self) -> u16 {
        self.input_y + 1
    }
}

/// Chip text: " label × ", truncated with an ellipsis to fit `width`
pub fn chip_text(label: &str, width: u16) -> String {
    let max_label = usize::from(width.saturating_sub(4)).max(1);
    let count = label.chars().count();
    if count <= max_label {
        format!(" {} {} ", label, REMOVE_GLYPH)
    } else {
        let cut: String = label.chars().take(max_label.saturating_sub(1)).collect();
        format!(" {}… {} ", cut, REMOVE_GLYPH)
    }
}

/// Lay chips out left to right in rows of `width` cells with a one-cell gap,
/// then place the input after the last chip.
pub fn layout_chips(labels: &[String], width: u16) -> ChipLayout {
    let mut slots = Vec::with_capacity(labels.len());
    let (mut x, mut y) = (0u16, 0u16);

    for (index, label) in labels.iter().enumerate() {
        let chip_width = chip_text(label, width).chars().count() as u16;
        if x > 0 && x.saturating_add(chip_width) > width {
            x = 0;
            y += 1;
        }
        slots.push(ChipSlot { index, x, y, width: chip_width });
        x = x.saturating_add(chip_width + 1);
    }

    if x > 0 && x.saturating_add(MIN_INPUT_WIDTH) > width {
        x = 0;
        y += 1;
    }

    ChipLayout { slots, input_x: x, input_y: y }
}

/// Where the widget was last drawn, for hit-testing clicks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Viewport {
    area: Rect,
    scroll: u16,
}

#[derive(Debug, Clone)]
pub struct TagWidget {
    tags: TagSet,
    input: TextInput,
    chips: Vec<Chip>,
    serialized: String,
    keys: TagKeys,
    layout: ChipLayout,
    viewport: Option<Viewport>,
}

impl TagWidget {
    /// Initialize from an optional pre-existing field value
    pub fn new(seed: Option<&str>, keys: TagKeys) -> Self {
        let tags = match seed {
            Some(seed) if !seed.trim().is_empty() => TagSet::parse(seed, keys.delimiter),
            _ => TagSet::new(keys.delimiter),
        };
        let mut widget = Self {
            tags,
            input: TextInput::new(),
            chips: Vec::new(),
            serialized: String::new(),
            keys,
            layout: ChipLayout::default(),
            viewport: None,
        };
        widget.sync();
        widget
    }

    pub fn tags(&self) -> &[String] {
        self.tags.tags()
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// Value of the hidden form field
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_value(&self) -> String {
        self.input.value()
    }

    pub fn layout(&self) -> &ChipLayout {
        &self.layout
    }

    /// Add a tag. Leaves the input alone; see [`TagWidget::confirm`].
    pub fn add(&mut self, raw: &str) -> AddOutcome {
        let outcome = self.tags.add(raw);
        match &outcome {
            AddOutcome::Added(tag) => {
                debug!(tag = %tag, count = self.tags.len(), "tag added");
                self.sync();
            }
            AddOutcome::Duplicate(tag) => debug!(tag = %tag, "duplicate tag ignored"),
            AddOutcome::Empty => {}
        }
        outcome
    }

    /// Remove the tag at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        let removed = self.tags.remove(index);
        match &removed {
            Some(tag) => {
                debug!(tag = %tag, index, count = self.tags.len(), "tag removed");
                self.sync();
            }
            None => debug!(index, len = self.tags.len(), "remove index out of range"),
        }
        removed
    }

    /// Remove every tag, last first
    pub fn clear(&mut self) {
        while !self.tags.is_empty() {
            self.remove(self.tags.len() - 1);
        }
    }

    /// The confirm action: add whatever is in the input, then clear the input
    /// unless it held nothing usable.
    pub fn confirm(&mut self) -> TagKeyOutcome {
        let raw = self.input.value();
        match self.add(&raw) {
            AddOutcome::Added(tag) => {
                self.input.clear();
                TagKeyOutcome::Added(tag)
            }
            AddOutcome::Duplicate(tag) => {
                self.input.clear();
                TagKeyOutcome::Duplicate(tag)
            }
            AddOutcome::Empty => TagKeyOutcome::Empty,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> TagKeyOutcome {
        let primary = has_primary_modifier(key.modifiers);

        if matches_key_event(key, &self.keys.confirm)
            || (key.code == KeyCode::Char(self.tags.delimiter()) && !primary)
        {
            return self.confirm();
        }

        // Enter never falls through to the host form while typing a tag,
        // even when confirm is bound elsewhere
        if key.code == KeyCode::Enter && !primary {
            return TagKeyOutcome::Suppressed;
        }

        if matches_key_event(key, &self.keys.erase) && self.input.is_empty() {
            if self.tags.is_empty() {
                return TagKeyOutcome::NothingToErase;
            }
            return match self.remove(self.tags.len() - 1) {
                Some(tag) => TagKeyOutcome::RemovedLast(tag),
                None => TagKeyOutcome::NothingToErase,
            };
        }

        match key.code {
            KeyCode::Char(c) if !primary => {
                self.input.insert_char(c);
                TagKeyOutcome::Edited
            }
            KeyCode::Backspace if !primary => {
                self.input.backspace();
                TagKeyOutcome::Edited
            }
            KeyCode::Delete => {
                self.input.delete();
                TagKeyOutcome::Edited
            }
            KeyCode::Left if primary => {
                self.input.move_word_left();
                TagKeyOutcome::Edited
            }
            KeyCode::Right if primary => {
                self.input.move_word_right();
                TagKeyOutcome::Edited
            }
            KeyCode::Left => {
                self.input.move_left();
                TagKeyOutcome::Edited
            }
            KeyCode::Right => {
                self.input.move_right();
                TagKeyOutcome::Edited
            }
            KeyCode::Home => {
                self.input.move_home();
                TagKeyOutcome::Edited
            }
            KeyCode::End => {
                self.input.move_end();
                TagKeyOutcome::Edited
            }
            _ => TagKeyOutcome::Ignored,
        }
    }

    /// Hit-test a left click at absolute terminal coordinates
    pub fn handle_click(&mut self, column: u16, row: u16) -> ClickOutcome {
        let Some(index) = self.chip_at(column, row) else {
            return ClickOutcome::Missed;
        };
        let on_remove = self
            .slot_origin(index)
            .map(|(x, y)| column == x + self.layout.slots[index].width.saturating_sub(2) && row == y)
            .unwrap_or(false);

        if on_remove {
            match self.remove(index) {
                Some(tag) => ClickOutcome::Removed(tag),
                None => ClickOutcome::Missed,
            }
        } else {
            ClickOutcome::Chip(index)
        }
    }

    /// Index of the chip drawn at absolute coordinates, if any
    pub fn chip_at(&self, column: u16, row: u16) -> Option<usize> {
        self.layout.slots.iter().find_map(|slot| {
            let (x, y) = self.slot_origin(slot.index)?;
            let hit = Rect::new(x, y, slot.width, 1).contains(Position::new(column, row));
            hit.then_some(slot.index)
        })
    }

    /// Absolute origin of a visible chip
    fn slot_origin(&self, index: usize) -> Option<(u16, u16)> {
        let viewport = self.viewport?;
        let slot = self.layout.slots.get(index)?;
        if slot.y < viewport.scroll || slot.y - viewport.scroll >= viewport.area.height {
            return None;
        }
        Some((viewport.area.x + slot.x, viewport.area.y + slot.y - viewport.scroll))
    }

    /// Lay chips out for `area`, the inside of the widget's box
    pub fn set_area(&mut self, area: Rect) {
        self.layout = layout_chips(self.tags.tags(), area.width);
        let scroll = self.layout.rows().saturating_sub(area.height);
        self.viewport = Some(Viewport { area, scroll });
    }

    /// Rebuild chips and the serialized field from the tag set. Positions are
    /// recomputed too so a click arriving before the next draw never hits a
    /// stale chip.
    fn sync(&mut self) {
        self.chips = self
            .tags
            .iter()
            .enumerate()
            .map(|(index, label)| Chip { index, label: label.to_string() })
            .collect();
        self.serialized = self.tags.serialize();
        if let Some(viewport) = self.viewport {
            self.set_area(viewport.area);
        }
    }
}

/// Draw the widget inside a bordered box and remember where it went
pub fn render_tag_input(f: &mut Frame, area: Rect, widget: &mut TagWidget, focused: bool, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let chip_bg = parse_color(&theme.chip_bg);
    let chip_fg = get_contrast_text_color(chip_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(if focused { "> Tags:" } else { "  Tags:" })
        .border_style(if focused {
            Style::default().fg(highlight_bg)
        } else {
            Style::default().fg(fg_color)
        })
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = block.inner(area);
    widget.set_area(inner);

    let layout = widget.layout.clone();
    let chip_style = Style::default().fg(chip_fg).bg(chip_bg).add_modifier(Modifier::BOLD);

    let mut rows: Vec<Vec<Span>> = vec![Vec::new(); usize::from(layout.rows())];
    let mut row_width = vec![0u16; rows.len()];
    for slot in &layout.slots {
        let row = usize::from(slot.y);
        if slot.x > row_width[row] {
            rows[row].push(Span::raw(" ".repeat(usize::from(slot.x - row_width[row]))));
        }
        let text = chip_text(&widget.chips[slot.index].label, inner.width);
        rows[row].push(Span::styled(text, chip_style));
        row_width[row] = slot.x + slot.width;
    }

    let input_row = usize::from(layout.input_y);
    if layout.input_x > row_width[input_row] {
        rows[input_row].push(Span::raw(" ".repeat(usize::from(layout.input_x - row_width[input_row]))));
    }
    let input_width = inner.width.saturating_sub(layout.input_x);
    let (visible, cursor_col) = widget.input.visible(usize::from(input_width));
    if widget.tags.is_empty() && widget.input.is_empty() && !focused {
        rows[input_row].push(Span::styled(
            "type a tag, Enter to add",
            Style::default().fg(fg_color).add_modifier(Modifier::DIM),
        ));
    } else {
        rows[input_row].push(Span::raw(visible));
    }

    let scroll = widget.viewport.map(|v| v.scroll).unwrap_or(0);
    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(fg_color).bg(bg_color))
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + layout.input_x + cursor_col as u16;
        let y = inner.y + layout.input_y.saturating_sub(scroll);
        if x < inner.x + inner.width && y < inner.y + inner.height {
            f.set_cursor_position((x, y));
        }
    }
}
