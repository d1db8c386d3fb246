//! sift — supplier search in the terminal.
//!
//! The binary has two faces: the interactive TUI (`sift-tui`) and a headless
//! one-shot mode for scripts. Both drive the same [`sift_core::SearchSession`]
//! against a [`sift_client::TypesenseClient`].
//!
//! # Architecture
//!
//! ```text
//! sift-core (state, query, response) ──► sift-client (HTTP, dispatch) ──► sift-tui
//!                     └──────────────────────► headless
//! ```

pub mod headless;
