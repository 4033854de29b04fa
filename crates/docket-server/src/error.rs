//! API error type and its JSON wire form.
//!
//! Every JSON error body has the shape
//! `{"success": false, "error": <message>, "details"?: <cause>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docket_core::TemplateId;
use docket_render::RenderError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Template ID is required")]
    MissingTemplateId,

    #[error("Template not found")]
    TemplateNotFound(Option<TemplateId>),

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Failed to render template")]
    Render(#[source] RenderError),

    #[error("Failed to generate PDF")]
    Pdf(#[source] RenderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTemplateId | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Render(_) | ApiError::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying cause, surfaced to clients as `details`.
    pub fn details(&self) -> Option<String> {
        match self {
            ApiError::Render(e) | ApiError::Pdf(e) => Some(e.to_string()),
            ApiError::InvalidBody(cause) => Some(cause.clone()),
            _ => None,
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        if err.is_pdf() {
            ApiError::Pdf(err)
        } else {
            ApiError::Render(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, details = ?self.details(), "request failed");
        }

        let mut body = json!({
            "success": false,
            "error": self.to_string(),
        });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::MissingTemplateId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::TemplateNotFound(None).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(RenderError::Pdf("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn render_errors_split_by_origin() {
        assert!(matches!(
            ApiError::from(RenderError::Pdf("x".into())),
            ApiError::Pdf(_)
        ));
        assert!(matches!(
            ApiError::from(RenderError::PdfTimeout(std::time::Duration::from_secs(1))),
            ApiError::Pdf(_)
        ));
    }

    #[test]
    fn invalid_body_is_a_bad_request_with_cause() {
        let err = ApiError::InvalidBody("EOF while parsing".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details().as_deref(), Some("EOF while parsing"));
    }

    #[test]
    fn details_only_for_failures_with_a_cause() {
        assert_eq!(ApiError::MissingTemplateId.details(), None);
        assert_eq!(
            ApiError::Pdf(RenderError::Pdf("chromium missing".into())).details().as_deref(),
            Some("pdf generation failed: chromium missing")
        );
    }
}
