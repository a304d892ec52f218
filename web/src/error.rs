use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind};
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

/// JSON payload returned for every failed request.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<String>,
}

impl Error {
    /// Status code and operator-facing message for the wrapped domain error.
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Config(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Analytics service is not configured",
                ),
                InternalErrorKind::Other(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR")
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::UpstreamHttp { status, .. } => (
                    upstream_status_code(*status),
                    "Failed to fetch room sessions",
                ),
                ExternalErrorKind::Network => {
                    (StatusCode::BAD_GATEWAY, "Analytics service is unreachable")
                }
                ExternalErrorKind::Decode(_) => (
                    StatusCode::BAD_GATEWAY,
                    "Unexpected response from analytics service",
                ),
            },
        }
    }
}

/// Passes through upstream error statuses; anything that is not a 4xx or 5xx becomes 502.
fn upstream_status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|code| code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let details = self.0.details();

        if status.is_server_error() {
            error!("{message} ({status}): {}", details.as_deref().unwrap_or("-"));
        } else {
            warn!("{message} ({status}): {}", details.as_deref().unwrap_or("-"));
        }

        let body = ErrorBody {
            error: message.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
