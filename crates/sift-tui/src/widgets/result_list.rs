//! Result list widget — the supplier hits on the right.
//!
//! Each document takes two rows: the name, then `industry · province ·
//! verified: …`. When the search is idle and there are no documents the pane
//! shows an explicit "No results." line instead.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one result |
//! | `↓` / `j` | Move cursor down one result |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use sift_core::SupplierDoc;

const ROWS_PER_RESULT: usize = 2;
pub const NO_RESULTS: &str = "No results.";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultListState {
    /// Index of the highlighted result.
    pub cursor: usize,
    /// Index of the first visible result.
    pub offset: usize,
    /// Results that fit on screen, cached from the last render.
    last_page: Cell<usize>,
}

impl Default for ResultListState {
    fn default() -> Self {
        Self { cursor: 0, offset: 0, last_page: Cell::new(10) }
    }
}

impl ResultListState {
    fn page(&self) -> usize {
        self.last_page.get().max(1)
    }

    /// Call after the result set was replaced.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn handle(&mut self, event: &AppEvent, total: usize) {
        if total == 0 {
            return;
        }
        let last = total - 1;
        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(self.page()),
            AppEvent::ScrollDown => self.cursor = (self.cursor + self.page()).min(last),
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "results: cursor moved");
    }

    fn follow_cursor(&mut self) {
        let page = self.page();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    results: &'a [SupplierDoc],
    loading: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(
        state: &'a ResultListState,
        results: &'a [SupplierDoc],
        loading: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, results, loading, focused, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Suppliers").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let page = (inner.height as usize / ROWS_PER_RESULT).max(1);
        // Page size for handle(); draw always runs before handle()
        self.state.last_page.set(page);

        if self.results.is_empty() {
            if !self.loading {
                Paragraph::new(Line::from(Span::styled(
                    NO_RESULTS,
                    Style::default().add_modifier(Modifier::DIM),
                )))
                .render(inner, buf);
            }
            return;
        }

        let total = self.results.len();
        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + page).min(total);

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        let lines: Vec<Line<'static>> = self.results[start..end]
            .iter()
            .enumerate()
            .flat_map(|(row, doc)| {
                let highlighted = self.focused && start + row == self.state.cursor;
                render_doc(doc, highlighted, self.theme)
            })
            .collect();

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(page);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Document rendering
// ---------------------------------------------------------------------------

fn render_doc(doc: &SupplierDoc, highlighted: bool, theme: &Theme) -> [Line<'static>; 2] {
    let mut name = Line::from(Span::styled(doc.name.clone(), theme.result_name));
    if highlighted {
        name = name.patch_style(Style::default().add_modifier(Modifier::REVERSED));
    }

    let meta = Line::from(vec![
        Span::styled(format!("  {} · {} · ", doc.industry, doc.province), theme.result_meta),
        Span::styled(
            format!("verified: {}", doc.verified),
            theme.verified_style(doc.verified),
        ),
    ]);

    [name, meta]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
