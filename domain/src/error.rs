//! Error types for the `domain` layer.
use room_analytics::Error as AnalyticsError;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` matches on the `error_kind`s to pick HTTP status codes and
/// the diagnostic details returned to operators, without depending on `reqwest` or
/// `room_analytics` directly.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Failures that originate on this side of the upstream boundary.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// A required setting is missing. Detected before any network call is made.
    Config(String),
    Other(String),
}

/// Failures of, or caused by, the upstream analytics service.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// Upstream answered with a non-2xx status.
    UpstreamHttp { status: u16, body: String },
    /// The request failed before a response was received.
    Network,
    /// The response could not be interpreted as a sessions page.
    Decode(String),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(message.into())),
        }
    }

    /// A human readable explanation suitable for the `details` field of an error payload.
    pub fn details(&self) -> Option<String> {
        match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Config(message))
            | DomainErrorKind::Internal(InternalErrorKind::Other(message))
            | DomainErrorKind::External(ExternalErrorKind::Decode(message)) => {
                Some(message.clone())
            }
            DomainErrorKind::External(ExternalErrorKind::UpstreamHttp { status, body }) => {
                if body.is_empty() {
                    Some(format!("upstream responded with status {status}"))
                } else {
                    Some(body.clone())
                }
            }
            DomainErrorKind::External(ExternalErrorKind::Network) => {
                self.source.as_ref().map(|e| e.to_string())
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// A page containing a record that cannot be identified is treated the same as
// a page that cannot be parsed: the upstream schema no longer matches.
impl From<AnalyticsError> for Error {
    fn from(err: AnalyticsError) -> Self {
        Error {
            error_kind: DomainErrorKind::External(ExternalErrorKind::Decode(err.to_string())),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        } else if err.is_decode() {
            Error {
                error_kind: DomainErrorKind::External(ExternalErrorKind::Decode(err.to_string())),
                source: Some(Box::new(err)),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            error_kind: DomainErrorKind::External(ExternalErrorKind::Decode(format!(
                "Invalid sessions payload: {err}"
            ))),
            source: Some(Box::new(err)),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to sign analytics access token".to_string(),
            )),
        }
    }
}
