//! docket-core: petition template server core library.
//!
//! This crate holds everything that does not touch the network or a browser:
//! the shared types, the configuration layer, the case-number formatter, the
//! template-data normalizer, and the built-in template catalogue.
//!
//! # Architecture
//!
//! ```text
//! request ──► FormData ──► TemplateKind::normalize ──► TemplateVariables
//!                 │                 │
//!                 │                 └──► case_number::format_case_number
//!                 └──► TemplateRepository (lookup by TemplateId)
//! ```
//!
//! Rendering (Handlebars, headless Chromium) lives in `docket-render`; the HTTP
//! shell lives in `docket-server`.

pub mod case_number;
pub mod config;
pub mod form;
pub mod normalize;
pub mod repository;
pub mod types;

pub use case_number::format_case_number;
pub use form::{AdvocateEntry, FormData, PersonRecord};
pub use normalize::{normalize, TemplateVariables};
pub use repository::{BuiltinTemplates, TemplateRepository};
pub use types::{TemplateId, TemplateKind, TemplateRecord};
