//! Shared test utilities for docket integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Nothing here touches the wall clock: every harness
//! normalizes against the fixed date returned by [`fixtures::today`].

pub mod assertions;
pub mod builders;
pub mod fakes;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fakes::*;
pub use fixtures::*;
