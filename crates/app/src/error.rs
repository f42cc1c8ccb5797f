use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wedplan_core::error::CoreError;
use wedplan_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for remote store
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wedplan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A data store, blob storage or local storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The user navigated away before this screen finished loading.
    #[error("Screen superseded by a later navigation")]
    Superseded,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Whether the failure was caught before any store call was attempted.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Core(
                CoreError::Validation(_) | CoreError::Forbidden(_) | CoreError::Unauthorized(_)
            ) | AppError::BadRequest(_)
        )
    }

    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(
                CoreError::Validation(msg) | CoreError::Forbidden(msg) | CoreError::Unauthorized(msg),
            ) => msg.clone(),
            AppError::Core(CoreError::NotFound { entity, .. }) => {
                format!("{entity} no longer exists")
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Store(err) if is_unique_violation(err) => {
                "That record already exists".to_string()
            }
            AppError::Store(StoreError::Storage(err)) => format!("Storage failed: {err}"),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Superseded => (
                StatusCode::CONFLICT,
                "SUPERSEDED",
                "The screen changed before this request finished".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn is_duplicate(msg: &str) -> bool {
    msg.starts_with("duplicate key")
}

fn is_unique_violation(err: &StoreError) -> bool {
    match err {
        StoreError::Database(sqlx::Error::Database(db_err)) => {
            db_err.code().as_deref() == Some("23505")
        }
        StoreError::InvalidQuery(msg) => is_duplicate(msg),
        _ => false,
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - An unreachable or failing store maps to 502.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Database(sqlx::Error::Database(db_err)) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            store_failed()
        }
        StoreError::InvalidQuery(msg) if is_duplicate(msg) => {
            (StatusCode::CONFLICT, "CONFLICT", msg.clone())
        }
        StoreError::Database(_) | StoreError::Unavailable(_) | StoreError::Storage(_) => {
            tracing::error!(error = %err, "Store request failed");
            store_failed()
        }
        StoreError::UnknownColumn { .. } | StoreError::InvalidQuery(_) | StoreError::Decode(_) => {
            tracing::error!(error = %err, "Store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn store_failed() -> (StatusCode, &'static str, String) {
    (
        StatusCode::BAD_GATEWAY,
        "STORE_ERROR",
        "The data store request failed".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_rejection() {
        let err = AppError::from(CoreError::validation("A rejection reason is required"));
        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "A rejection reason is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_store_is_bad_gateway() {
        let err = AppError::from(StoreError::Unavailable("events".into()));
        assert!(!err.is_rejection());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn duplicate_key_is_conflict() {
        let err = AppError::from(StoreError::InvalidQuery(
            "duplicate key value violates unique constraint on user_roles".into(),
        ));
        assert_eq!(err.user_message(), "That record already exists");
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
