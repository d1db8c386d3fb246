//! Facet pane — collapsible list of facet fields and their value counts in
//! the left pane.
//!
//! Counts come from the last successful response. The pane never changes the
//! filter itself: `Enter` on a value yields a [`FacetPick`] and the app shell
//! toggles the selection and searches again.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `→`/`l` expands the focused field; `←`/`h` collapses it.
//! - `Enter` on a field toggles it; on a value picks it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};
use sift_core::{Facet, FacetCount, FacetSelections, FacetValueCount};

/// A value the user picked from the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPick {
    pub facet: Facet,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct FacetGroup {
    pub facet: Facet,
    pub expanded: bool,
    pub values: Vec<FacetValueCount>,
}

/// One line of the flattened pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Group(usize),
    Value(usize, usize),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FacetPaneState {
    pub groups: Vec<FacetGroup>,
    /// Index into the flattened visible rows.
    pub cursor: usize,
}

impl Default for FacetPaneState {
    fn default() -> Self {
        Self {
            groups: Facet::ALL
                .into_iter()
                .map(|facet| FacetGroup { facet, expanded: true, values: Vec::new() })
                .collect(),
            cursor: 0,
        }
    }
}

impl FacetPaneState {
    /// Replace the value counts with those from a new response. Expansion
    /// state is kept; fields the response did not mention become empty.
    pub fn update_counts(&mut self, counts: &[FacetCount]) {
        for group in &mut self.groups {
            group.values = counts
                .iter()
                .find(|c| c.field_name == group.facet.field())
                .map(|c| c.counts.clone())
                .unwrap_or_default();
        }
        self.clamp_cursor();
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            rows.push(Row::Group(g));
            if group.expanded {
                rows.extend((0..group.values.len()).map(|v| Row::Value(g, v)));
            }
        }
        rows
    }

    fn cursor_row(&self) -> Option<Row> {
        self.rows().get(self.cursor).copied()
    }

    /// Handle a navigation event. Returns a pick when `Enter` lands on a value.
    pub fn handle(&mut self, event: &AppEvent) -> Option<FacetPick> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.rows().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if let Some(Row::Group(g)) = self.cursor_row() {
                    self.groups[g].expanded = true;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                // Collapsing from a value row collapses its parent and moves
                // the cursor onto it.
                let group = match self.cursor_row() {
                    Some(Row::Group(g)) | Some(Row::Value(g, _)) => Some(g),
                    None => None,
                };
                if let Some(g) = group {
                    self.groups[g].expanded = false;
                    self.cursor = self.rows().iter().position(|r| *r == Row::Group(g)).unwrap_or(0);
                }
            }
            AppEvent::Enter => match self.cursor_row() {
                Some(Row::Group(g)) => {
                    self.groups[g].expanded = !self.groups[g].expanded;
                    self.clamp_cursor();
                }
                Some(Row::Value(g, v)) => {
                    let group = &self.groups[g];
                    let pick = FacetPick {
                        facet: group.facet,
                        value: group.values[v].value.clone(),
                    };
                    tracing::debug!(facet = %pick.facet, value = %pick.value, "facet picked");
                    return Some(pick);
                }
                None => {}
            },
            _ => {}
        }
        None
    }

    fn clamp_cursor(&mut self) {
        let max = self.rows().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FacetPane<'a> {
    state: &'a FacetPaneState,
    selections: &'a FacetSelections,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FacetPane<'a> {
    pub fn new(
        state: &'a FacetPaneState,
        selections: &'a FacetSelections,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, selections, focused, theme }
    }
}

impl Widget for FacetPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Facets").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .rows()
            .into_iter()
            .map(|row| match row {
                Row::Group(g) => {
                    let group = &self.state.groups[g];
                    let arrow = if group.expanded { "▼ " } else { "▶ " };
                    let active = self.selections.get(group.facet);
                    let mut spans = vec![Span::styled(
                        format!("{arrow}{}", group.facet),
                        self.theme.facet_field,
                    )];
                    if !active.is_empty() {
                        spans.push(Span::styled(
                            format!(" = {active}"),
                            Style::default().add_modifier(Modifier::ITALIC),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                }
                Row::Value(g, v) => {
                    let group = &self.state.groups[g];
                    let value = &group.values[v];
                    let selected = self.selections.get(group.facet) == value.value;
                    let (mark, style) = if selected {
                        ("✓ ", self.theme.facet_selected)
                    } else {
                        ("  ", Style::default())
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(format!("{mark}{}", value.value), style),
                        Span::styled(format!(" ({})", value.count), self.theme.facet_count),
                    ]))
                }
            })
            .collect();

        let list = List::new(items).highlight_style(if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
