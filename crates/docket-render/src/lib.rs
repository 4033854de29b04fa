//! docket-render: the rendering collaborators behind the normalizer.
//!
//! Each renderer is a trait so the HTTP layer can be tested with fakes:
//!
//! - [`HtmlRenderer`] expands a template's markup with normalized variables
//!   ([`HandlebarsRenderer`] in production).
//! - [`PdfRenderer`] prints finished HTML to PDF ([`ChromiumPdfRenderer`],
//!   a headless Chromium child process).

pub mod html;
pub mod pdf;

pub use html::{HandlebarsRenderer, HtmlRenderer};
pub use pdf::{ChromiumPdfRenderer, PaperFormat, PdfOptions, PdfRenderer};

use thiserror::Error;

/// Errors raised by the rendering collaborators.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template expansion failed: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("pdf generation failed: {0}")]
    Pdf(String),
    #[error("pdf generation timed out after {0:?}")]
    PdfTimeout(std::time::Duration),
    #[error("pdf scratch I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// `true` for failures that happened while producing a PDF rather than
    /// expanding the HTML.
    pub fn is_pdf(&self) -> bool {
        matches!(self, RenderError::Pdf(_) | RenderError::PdfTimeout(_) | RenderError::Io(_))
    }
}
