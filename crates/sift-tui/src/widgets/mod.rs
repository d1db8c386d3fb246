//! Ratatui widgets for the sift TUI.

pub mod command_bar;
pub mod facet_pane;
pub mod header;
pub mod help;
pub mod query_bar;
pub mod result_list;
pub mod status_line;
