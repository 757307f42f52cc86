use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brushlog_core::error::CoreError;
use brushlog_core::types::DbId;
use serde::Serialize;
use sqlx::error::DatabaseError;

/// Error returned by every handler.
///
/// Domain errors arrive as [`CoreError`], persistence errors as
/// [`sqlx::Error`]. Both render as `{ "error", "code" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl ErrorBody {
    fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    /// Generic 500 body. Details go to the log, never to the client.
    fn internal() -> (StatusCode, Self) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Self::new("INTERNAL_ERROR", "An internal error occurred"),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Core(err) => from_core(err),
            Self::Database(err) => from_sqlx(err),
        };
        (status, Json(body)).into_response()
    }
}

fn from_core(err: &CoreError) -> (StatusCode, ErrorBody) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", format!("{entity} with id {id} not found")),
        ),
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("VALIDATION_ERROR", msg.as_str()),
        ),
        CoreError::Unauthorized(msg) => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::new("UNAUTHORIZED", msg.as_str()),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            ErrorBody::internal()
        }
    }
}

/// `RowNotFound` is a 404. Unique violations on the `uq_*` indexes (the
/// one-primary-per-owner index among them) are 409 and check violations
/// are 400. Anything else is logged and reported as a bare 500.
fn from_sqlx(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        ),
        sqlx::Error::Database(db_err) => constraint_violation(&**db_err).unwrap_or_else(|| {
            tracing::error!(error = %db_err, "Database error");
            ErrorBody::internal()
        }),
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorBody::internal()
        }
    }
}

fn constraint_violation(db_err: &dyn DatabaseError) -> Option<(StatusCode, ErrorBody)> {
    let constraint = db_err.constraint()?;
    match db_err.code().as_deref()? {
        "23505" if constraint.starts_with("uq_") => Some((
            StatusCode::CONFLICT,
            ErrorBody::new("CONFLICT", format!("Conflicts with existing row ({constraint})")),
        )),
        "23514" => Some((
            StatusCode::BAD_REQUEST,
            ErrorBody::new("VALIDATION_ERROR", format!("Value rejected by {constraint}")),
        )),
        _ => None,
    }
}
