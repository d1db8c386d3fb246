//! Status line — the row between the panes and the query bar.
//!
//! Shows, in priority order: the last error (`Error: …`), a loading notice,
//! or the summary of the last applied search (found count, server time, sort
//! key, active filter, completion time).

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use sift_core::{query::filter_expression, SearchState};

pub struct StatusLine<'a> {
    state: &'a SearchState,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(state: &'a SearchState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// The text this widget renders, without styling.
    pub fn text(&self) -> String {
        let s = self.state;
        if let Some(ref err) = s.last_error {
            return format!("Error: {err}");
        }
        if s.is_loading {
            return "Searching…".to_string();
        }

        let mut parts = vec![
            format!("{} found", s.found),
            format!("{} ms", s.search_time_ms),
            format!("sort {}", s.sort_key),
        ];
        if let Some(filter) = filter_expression(&s.facets) {
            parts.push(format!("filter {filter}"));
        }
        if let Some(at) = s.completed_at {
            parts.push(format!("updated {}", at.format("%H:%M:%S")));
        }
        parts.join(" · ")
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.state.last_error.is_some() {
            self.theme.status_error
        } else if self.state.is_loading {
            self.theme.status_loading
        } else {
            self.theme.status_info
        };
        let line = Line::from(Span::styled(format!(" {}", self.text()), style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::Facet;

    #[test]
    fn error_takes_priority() {
        let mut state = SearchState::new("name:asc");
        state.is_loading = true;
        state.last_error = Some("search service returned 500: server error".to_string());
        let theme = Theme::load_default();
        assert_eq!(
            StatusLine::new(&state, &theme).text(),
            "Error: search service returned 500: server error"
        );
    }

    #[test]
    fn idle_summary_lists_filter() {
        let mut state = SearchState::new("name:asc");
        state.found = 3;
        state.search_time_ms = 2;
        state.facets.set(Facet::Province, "ON");
        let theme = Theme::load_default();
        assert_eq!(
            StatusLine::new(&state, &theme).text(),
            r#"3 found · 2 ms · sort name:asc · filter province:="ON""#
        );
    }
}
