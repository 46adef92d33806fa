use crate::db::errors::DbError;
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Missing or malformed input; rejected before any side effect
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// A view failed to render
    #[error("Failed to render {template}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid_input() -> Self {
        Error::BadRequest {
            message: "Invalid input data".to_string(),
        }
    }

    pub fn pet_not_found(id: impl ToString) -> Self {
        Error::NotFound {
            resource: "Pet".to_string(),
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Render { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, .. } => format!("{resource} not found"),
            Error::Database(_) | Error::Render { .. } | Error::Other(_) => "Internal Server Error".to_string(),
        }
    }
}

/// A form body that cannot be decoded (wrong content type, duplicate or malformed fields) is
/// invalid input like any other.
impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!("Rejected form body: {}", rejection.body_text());
        Error::invalid_input()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(db_err) if db_err.is_constraint_violation() => {
                tracing::warn!("Database constraint error: {:#}", self);
            }
            Error::Database(_) | Error::Render { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:?}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
