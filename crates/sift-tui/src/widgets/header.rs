//! Header widget — the 1-line title strip at the top of the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Title on the left, keybinding hints (`q:quit  ?:help`) right-aligned.
/// A `●` follows the title while a search is in flight.
pub struct Header<'a> {
    collection: &'a str,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(collection: &'a str, loading: bool, theme: &'a Theme) -> Self {
        Self { collection, loading, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" Supplier Search ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("[{}]", self.collection), Style::default().add_modifier(Modifier::DIM)),
        ];
        if self.loading {
            spans.push(Span::styled(" ●", self.theme.status_loading));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hint = " q:quit  s:sort  x:clear  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
