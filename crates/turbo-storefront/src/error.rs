//! Error types for the storefront.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use turbo_commerce::CommerceError;

/// Static page served for every 404.
pub const NOT_FOUND_PAGE: &str = include_str!("../templates/404.html");

/// Errors that can occur while serving a storefront request.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Requested resource does not exist or is hidden from the viewer.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Domain logic failure.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Template rendering failure.
    #[error("Template error: {0}")]
    Template(String),
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;

impl StorefrontError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StorefrontError::NotFound(what.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
            StorefrontError::Commerce(CommerceError::ProductNotFound(_))
            | StorefrontError::Commerce(CommerceError::CategoryNotFound(_))
            | StorefrontError::Commerce(CommerceError::InvalidPage(_))
            | StorefrontError::Commerce(CommerceError::InvalidIdentifier(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<handlebars::RenderError> for StorefrontError {
    fn from(err: handlebars::RenderError) -> Self {
        StorefrontError::Template(err.to_string())
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = %self, "responding 404");
            return (status, Html(NOT_FOUND_PAGE)).into_response();
        }

        tracing::error!(error = %self, "request failed");
        (status, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StorefrontError::not_found("product 1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            StorefrontError::from(CommerceError::InvalidPage("9".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StorefrontError::Template("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
