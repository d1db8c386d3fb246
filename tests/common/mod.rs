//! Shared test utilities for sift integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fake_typesense;
pub mod fixtures;

pub use builders::*;
pub use fake_typesense::FakeTypesense;
pub use fixtures::*;
