use ratatui::layout::{Constraint, Layout as RatLayout, Rect};

pub struct Layout {
    pub tags_area: Rect,
    pub search_area: Rect,
    pub clear_area: Rect,
    pub results_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal size, outer border excluded.
    /// Height: tags box (5) + buttons (3) + results (at least 2) + status (1).
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 11;

    /// Tags box: two chip rows plus borders
    pub const TAGS_HEIGHT: u16 = 5;
    pub const BUTTON_HEIGHT: u16 = 3;
    pub const BUTTON_WIDTH: u16 = 12;

    pub fn calculate(size: Rect) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let [tags_area, buttons_area, results_area, status_area] = RatLayout::vertical([
            Constraint::Length(Self::TAGS_HEIGHT),
            Constraint::Length(Self::BUTTON_HEIGHT),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .areas(inner_area);

        let [search_area, _, clear_area, _] = RatLayout::horizontal([
            Constraint::Length(Self::BUTTON_WIDTH),
            Constraint::Length(1),
            Constraint::Length(Self::BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .areas(buttons_area);

        Self {
            tags_area,
            search_area,
            clear_area,
            results_area,
            status_area,
        }
    }
}
