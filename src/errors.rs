//! # Filter errors
//!
//! Errors raised while turning filter requests into conditions. Each variant
//! maps to an HTTP status; the message sent to clients never carries internal
//! details.
//!
//! ```rust,ignore
//! use crudcrate_unaccent::{FilterError, apply_filters};
//!
//! async fn list_users(Query(params): Query<UnaccentFilterOptions>) -> Result<Json<Vec<User>>, FilterError> {
//!     let condition = apply_filters(params.filter.as_deref(), &columns, &builder)?;
//!     // ...
//! }
//! ```
//!
//! `UnknownLookup` means a registered keyword reached a point where no handler
//! claims it. It is logged with `tracing` at `error` level when converted into
//! a response and reported to clients as a generic 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// 500 Internal Server Error - Lookup accepted but not in the catalog
    UnknownLookup {
        /// Lookup name (logged, not sent to user)
        lookup: String,
    },

    /// 400 Bad Request - Lookup keyword was never registered
    UnregisteredLookup {
        /// Lookup name as given in the filter
        lookup: String,
    },

    /// 400 Bad Request - Malformed filter input
    InvalidFilter {
        /// User-facing error message
        message: String,
    },
}

impl FilterError {
    pub fn unknown_lookup(lookup: impl Into<String>) -> Self {
        Self::UnknownLookup {
            lookup: lookup.into(),
        }
    }

    pub fn unregistered_lookup(lookup: impl Into<String>) -> Self {
        Self::UnregisteredLookup {
            lookup: lookup.into(),
        }
    }

    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownLookup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnregisteredLookup { .. } | Self::InvalidFilter { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Get the user-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownLookup { .. } => "An internal error occurred".to_string(),
            Self::UnregisteredLookup { lookup } => format!("Unsupported lookup '{lookup}'"),
            Self::InvalidFilter { message } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::UnknownLookup { lookup } => {
                tracing::error!(lookup = %lookup, "Lookup has no registered handler");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Filter error"
                );
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        self.log_internal();

        let body = ErrorResponse {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for FilterError {}
