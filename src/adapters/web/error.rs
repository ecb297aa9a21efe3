//! HTTP error responses for the web adapter.

use askama::Template;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::AcademyError;

use super::is_htmx_request;
use super::templates::{ErrorTemplate, PageTemplate};

/// Headers telling htmx to put an error fragment in place of the whole app,
/// whatever the triggering element targeted.
const HTMX_ERROR_HEADERS: [(&str, &str); 3] = [
    ("HX-Retarget", "#app"),
    ("HX-Reswap", "outerHTML"),
    ("HX-Reselect", "#app"),
];

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    /// Answer with a bare fragment instead of a full page.
    pub htmx: bool,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            htmx: false,
        }
    }

    /// Shapes the response for the request that failed.
    pub fn for_request(mut self, headers: &HeaderMap) -> Self {
        self.htmx = is_htmx_request(headers);
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &AcademyError) -> StatusCode {
    match err {
        AcademyError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        AcademyError::InvalidAction { .. } => StatusCode::CONFLICT,
        AcademyError::UnknownSection(_) | AcademyError::UnknownItem { .. } => {
            StatusCode::NOT_FOUND
        }
        AcademyError::ConfigParse { .. }
        | AcademyError::ConfigInvalid { .. }
        | AcademyError::Session { .. }
        | AcademyError::Export(_)
        | AcademyError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<AcademyError> for WebError {
    fn from(err: AcademyError) -> Self {
        let status = status_from_error(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self::new(status, err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        tracing::error!(error = %err, "template rendering failed");
        Self::internal(format!("template error: {err}"))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let fragment = ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        let content = match fragment.render() {
            Ok(html) => html,
            Err(_) => return (self.status, self.message).into_response(),
        };
        if self.htmx {
            return (self.status, HTMX_ERROR_HEADERS, Html(content)).into_response();
        }
        let page = PageTemplate {
            title: "Error",
            content: &content,
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, Html(content)).into_response(),
        }
    }
}
