//! Route handlers.
//!
//! JSON endpoints answer errors through [`ApiError`]; the browser preview
//! endpoint answers with small HTML pages instead, since it is opened directly
//! in a browser tab.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use docket_core::{FormData, TemplateId, TemplateRecord};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

const PDF_FILENAME: &str = "petition.pdf";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /api/templates/render`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Number or numeric string; kept raw so "absent" and "unknown" can be
    /// told apart.
    #[serde(default)]
    pub template_id: Value,
    #[serde(default)]
    pub form_data: FormData,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Requested output. Anything other than `"pdf"` means HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum OutputFormat {
    #[default]
    Html,
    Pdf,
}

impl From<Value> for OutputFormat {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("pdf") => OutputFormat::Pdf,
            _ => OutputFormat::Html,
        }
    }
}

/// Resolve the body's `templateId`: falsy values are "missing" (400), values
/// that are present but not a usable id are "not found" (404).
fn requested_id(value: &Value) -> Result<TemplateId, ApiError> {
    let missing = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if missing {
        return Err(ApiError::MissingTemplateId);
    }
    TemplateId::from_json(value).ok_or(ApiError::TemplateNotFound(None))
}

/// A body without a JSON content type reads as an empty object, so it ends in
/// "Template ID is required". A body that claims JSON but does not parse is
/// rejected as invalid.
fn request_body(body: Result<Json<RenderRequest>, JsonRejection>) -> Result<RenderRequest, ApiError> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiError::MissingTemplateId),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected render request body");
            Err(ApiError::InvalidBody(rejection.body_text()))
        }
    }
}

fn find(state: &AppState, id: TemplateId) -> Result<TemplateRecord, ApiError> {
    state
        .templates
        .find_active(id)
        .ok_or(ApiError::TemplateNotFound(Some(id)))
}

fn render_html(state: &AppState, template: &TemplateRecord, form: &FormData) -> Result<String, ApiError> {
    let variables = template.kind.normalize(form, (state.today)());
    Ok(state.html.render(template, &variables)?)
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Template server is running",
        "templatesCount": state.templates.list_active().len(),
    }))
}

pub async fn list_templates(State(state): State<AppState>) -> Json<Value> {
    let templates = state.templates.list_active();
    Json(json!({
        "success": true,
        "count": templates.len(),
        "data": templates,
    }))
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = TemplateId::parse_prefix(&id).ok_or(ApiError::TemplateNotFound(None))?;
    let template = find(&state, id)?;
    Ok(Json(json!({ "success": true, "data": template })))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub async fn render_template(
    State(state): State<AppState>,
    body: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = request_body(body)?;
    let id = requested_id(&request.template_id)?;
    let template = find(&state, id)?;
    let html = render_html(&state, &template, &request.form_data)?;

    match request.format {
        OutputFormat::Html => {
            tracing::info!(template_id = %id, kind = %template.kind, "rendered html");
            Ok(Html(html).into_response())
        }
        OutputFormat::Pdf => {
            let pdf = state.pdf.render(&html).await.map_err(ApiError::Pdf)?;
            tracing::info!(template_id = %id, kind = %template.kind, size_bytes = pdf.len(), "rendered pdf");
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{PDF_FILENAME}\""),
                    ),
                ],
                pdf,
            )
                .into_response())
        }
    }
}

/// `GET /api/templates/render` names no template.
pub async fn preview_without_id() -> ApiError {
    ApiError::TemplateNotFound(None)
}

/// Browser preview. `?formData=` carries a JSON object; if it does not parse
/// the template is rendered with defaults only.
pub async fn preview_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let form = match query.get("formData") {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(v) => FormData::from_json(&v),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unparseable formData query parameter");
                FormData::default()
            }
        },
        None => FormData::default(),
    };

    let result = TemplateId::parse_prefix(&id)
        .ok_or(ApiError::TemplateNotFound(None))
        .and_then(|id| find(&state, id))
        .and_then(|template| render_html(&state, &template, &form));

    match result {
        Ok(html) => Html(html).into_response(),
        Err(ApiError::TemplateNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Html("<html><body><h1>Template not found</h1></body></html>".to_string()),
        )
            .into_response(),
        Err(e) => {
            let cause = e.details().unwrap_or_else(|| e.to_string());
            tracing::error!(error = %cause, "template preview failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(error_page(&cause)),
            )
                .into_response()
        }
    }
}

fn error_page(cause: &str) -> String {
    format!(
        "<html><body><h1>Error rendering template</h1><p>{}</p></body></html>",
        handlebars::html_escape(cause)
    )
}
