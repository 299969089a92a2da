//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    extract::rejection::QueryRejection,
    response::{IntoResponse, Response},
    Json,
};
use common::pagination;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::infra::database;
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            cause: None,
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,

    /// Description of the underlying cause of this [`Error`], if any.
    pub cause: Option<String>,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(cause: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "An unexpected error occurred".to_owned(),
            cause: Some(cause.to_string()),
            backtrace: None,
        }
    }

    /// Attaches the provided `cause` to this [`Error`].
    #[must_use]
    pub fn with_cause(mut self, cause: &impl ToString) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Attaches the provided backtrace to this [`Error`].
    #[must_use]
    pub fn with_backtrace(mut self, trace: &Trace) -> Self {
        self.backtrace = Some(trace.clone());
        self
    }

    /// Names the `action` an internal server [`Error`] happened during.
    ///
    /// Client [`Error`]s are left untouched.
    #[must_use]
    pub fn during(mut self, action: &str) -> Self {
        if self.status_code.is_server_error() {
            self.message = format!("An error occurred while {action}");
        }
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
            cause,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}{}",
            cause.iter().format_with("", |c, f| f(&format_args!(": {c}"))),
            backtrace
                .iter()
                .format_with("", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// JSON body of an [`Error`] response.
#[derive(Debug, Serialize)]
struct Body<'e> {
    /// Human-readable message.
    message: &'e str,

    /// Underlying cause, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'e str>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }

        let body = Body {
            message: &self.message,
            error: self.cause.as_deref(),
        };
        (self.status_code, Json(body)).into_response()
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError + fmt::Display> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let error = self.as_ref().try_as_error();
        Some(
            error
                .unwrap_or_else(|| Error::internal(self.as_ref()))
                .with_backtrace(self.trace()),
        )
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for pagination::ArgumentsError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::from(RequestError::InvalidPagination).with_cause(self))
    }
}

impl AsError for QueryRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(
            Error::from(RequestError::InvalidQuery)
                .with_cause(&self.body_text()),
        )
    }
}

define_error! {
    enum RequestError {
        #[code = "INVALID_PAGINATION"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        InvalidPagination,

        #[code = "INVALID_QUERY"]
        #[status = BAD_REQUEST]
        #[message = "Invalid query parameters"]
        InvalidQuery,
    }
}

#[cfg(test)]
mod spec {
    use super::{Error, RequestError};

    #[test]
    fn names_action_of_internal_errors_only() {
        let internal = Error::internal(&"connection reset")
            .during("retrieving properties");
        assert_eq!(
            internal.message,
            "An error occurred while retrieving properties",
        );
        assert_eq!(internal.cause.as_deref(), Some("connection reset"));

        let client = Error::from(RequestError::InvalidQuery)
            .during("retrieving properties");
        assert_eq!(client.message, "Invalid query parameters");
        assert_eq!(client.status_code, http::StatusCode::BAD_REQUEST);
    }
}
