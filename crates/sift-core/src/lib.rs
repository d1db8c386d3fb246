//! sift-core — supplier search core library.
//!
//! Everything here is independent of the terminal and of the HTTP stack:
//!
//! ```text
//! SearchState ──build_request──► SearchRequest ──SearchBackend──► SearchResponse
//!      ▲                                                              │
//!      └──────────────── SearchSession::complete ◄────────────────────┘
//! ```
//!
//! The request builder is a pure function so it can be tested without a
//! network. The session owns the state and decides which outcomes apply.

pub mod backend;
pub mod config;
pub mod error;
pub mod query;
pub mod response;
pub mod session;
pub mod types;

pub use backend::SearchBackend;
pub use error::{ConfigError, SearchError};
pub use query::{build_request, SearchRequest};
pub use response::SearchResponse;
pub use session::{Completion, SearchOutcome, SearchSession, Ticket};
pub use types::{Facet, FacetCount, FacetSelections, FacetValueCount, SearchState, SupplierDoc};
