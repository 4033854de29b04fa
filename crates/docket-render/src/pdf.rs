//! PDF rendering: prints finished HTML through a headless Chromium process.
//!
//! Each render gets its own scratch directory and browser process; nothing is
//! shared between requests except the semaphore that caps how many browsers
//! run at once. Page geometry is pinned through an injected `@page` rule so
//! the browser's own print defaults never leak into the output.

use crate::RenderError;
use async_trait::async_trait;
use docket_core::config::PdfConfig;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Semaphore;

/// Prints HTML to PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Paper sizes understood by the `@page size` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperFormat {
    A4,
    Letter,
}

impl PaperFormat {
    fn css(self) -> &'static str {
        match self {
            PaperFormat::A4 => "A4",
            PaperFormat::Letter => "letter",
        }
    }
}

/// Print settings applied to every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfOptions {
    pub paper: PaperFormat,
    pub print_background: bool,
    /// Margin on all four sides.
    pub margin_mm: u32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            paper: PaperFormat::A4,
            print_background: true,
            margin_mm: 20,
        }
    }
}

impl PdfOptions {
    /// Style block that enforces these options inside the page itself.
    pub fn page_css(&self) -> String {
        let mut css = format!(
            "@page {{ size: {}; margin: {m}mm {m}mm {m}mm {m}mm; }}",
            self.paper.css(),
            m = self.margin_mm
        );
        if self.print_background {
            css.push_str(" html { -webkit-print-color-adjust: exact; print-color-adjust: exact; }");
        }
        format!("<style data-docket-print>{css}</style>")
    }

    /// Insert [`Self::page_css`] at the end of `<head>`, or at the very start
    /// of the document when it has no head.
    pub fn apply(&self, html: &str) -> String {
        let style = self.page_css();
        match find_ascii_case_insensitive(html, "</head>") {
            Some(at) => format!("{}{}{}", &html[..at], style, &html[at..]),
            None => format!("{style}{html}"),
        }
    }
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

// ---------------------------------------------------------------------------
// ChromiumPdfRenderer
// ---------------------------------------------------------------------------

/// Headless Chromium `--print-to-pdf` renderer.
pub struct ChromiumPdfRenderer {
    binary: String,
    extra_args: Vec<String>,
    options: PdfOptions,
    timeout: Duration,
    virtual_time_budget: Duration,
    permits: Arc<Semaphore>,
}

impl ChromiumPdfRenderer {
    pub fn new(config: &PdfConfig) -> Self {
        Self {
            binary: config.chromium_path.clone(),
            extra_args: config.extra_args.clone(),
            options: PdfOptions::default(),
            timeout: config.timeout(),
            virtual_time_budget: Duration::from_millis(config.virtual_time_budget_ms),
            permits: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        }
    }

    pub fn with_options(mut self, options: PdfOptions) -> Self {
        self.options = options;
        self
    }

    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg("--run-all-compositor-stages-before-draw")
            .arg(format!(
                "--virtual-time-budget={}",
                self.virtual_time_budget.as_millis()
            ))
            .arg(format!("--print-to-pdf={}", output.display()))
            .args(&self.extra_args)
            .arg(format!("file://{}", input.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl PdfRenderer for ChromiumPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("document.html");
        let output = scratch.path().join("document.pdf");
        tokio::fs::write(&input, self.options.apply(html)).await?;

        tracing::debug!(binary = %self.binary, "launching headless browser");
        let run = self.command(&input, &output).output();
        let result = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| RenderError::PdfTimeout(self.timeout))?
            .map_err(|e| RenderError::Pdf(format!("failed to launch {}: {e}", self.binary)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::Pdf(format!(
                "{} exited with {}: {}",
                self.binary,
                result.status,
                stderr.trim()
            )));
        }

        let pdf = tokio::fs::read(&output)
            .await
            .map_err(|e| RenderError::Pdf(format!("no PDF produced: {e}")))?;
        if !pdf.starts_with(b"%PDF") {
            return Err(RenderError::Pdf("browser output is not a PDF".to_string()));
        }

        tracing::info!(size_bytes = pdf.len(), "pdf generated");
        Ok(pdf)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
