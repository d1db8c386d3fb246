//! sift-client — talks to the hosted search service.
//!
//! [`TypesenseClient`] is the production [`sift_core::SearchBackend`];
//! [`SearchDispatcher`] runs any backend on background tasks for the TUI.

pub mod dispatch;
pub mod typesense;

pub use dispatch::SearchDispatcher;
pub use typesense::{TypesenseClient, API_KEY_HEADER};
