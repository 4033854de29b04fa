//! In-process stand-ins for the browser and the template engine, and a
//! router wired with them.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use axum::Router;
use docket_core::{BuiltinTemplates, TemplateRecord, TemplateRepository, TemplateVariables};
use docket_render::{HandlebarsRenderer, HtmlRenderer, PdfRenderer, RenderError};
use docket_server::AppState;
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n%fake\n%%EOF\n";

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// Records every HTML document it is asked to print.
pub struct FakePdfRenderer {
    failure: Option<String>,
    calls: AtomicUsize,
    last_html: Mutex<Option<String>>,
}

impl FakePdfRenderer {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            failure: None,
            calls: AtomicUsize::new(0),
            last_html: Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
            calls: AtomicUsize::new(0),
            last_html: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_html(&self) -> Option<String> {
        self.last_html.lock().expect("lock").clone()
    }
}

#[async_trait]
impl PdfRenderer for FakePdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_html.lock().expect("lock") = Some(html.to_string());
        match &self.failure {
            Some(message) => Err(RenderError::Pdf(message.clone())),
            None => Ok(FAKE_PDF.to_vec()),
        }
    }
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

/// Fails every render with a template error, as a corrupted template would.
pub struct BrokenHtmlRenderer;

impl HtmlRenderer for BrokenHtmlRenderer {
    fn render(
        &self,
        _template: &TemplateRecord,
        variables: &TemplateVariables,
    ) -> Result<String, RenderError> {
        let mut broken = BuiltinTemplates::new().list_active().remove(0);
        broken.content = "{{#if caseNumber}}unclosed".to_string();
        HandlebarsRenderer::new().render(&broken, variables)
    }
}

// ---------------------------------------------------------------------------
// Router wiring
// ---------------------------------------------------------------------------

/// Built-in catalogue, real Handlebars, the given PDF fake, fixed date.
pub fn state_with_pdf(pdf: Arc<dyn PdfRenderer>) -> AppState {
    AppState {
        templates: Arc::new(BuiltinTemplates::new()),
        html: Arc::new(HandlebarsRenderer::new()),
        pdf,
        today: Arc::new(super::fixtures::today),
    }
}

pub fn test_router() -> Router {
    docket_server::router(state_with_pdf(FakePdfRenderer::ok()))
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("body is UTF-8")
}
