//! Application error type shared by repositories and services.

use serde_json::{Value, json};

/// Errors surfaced by repositories and the teardown services.
///
/// Every variant carries a human-readable `message` plus a structured `details`
/// payload so callers can log the full context of a failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the structured details attached to this error.
    pub fn details(&self) -> &Value {
        match self {
            Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    /// Merges `extra` into the error details, keeping the variant and message.
    ///
    /// Object keys from `extra` overwrite existing keys. A non-object payload is
    /// replaced wholesale.
    pub fn with_details(mut self, extra: Value) -> Self {
        let details = match &mut self {
            Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::Internal { details, .. } => details,
        };

        match extra {
            Value::Object(extra) if details.is_object() => {
                if let Some(existing) = details.as_object_mut() {
                    existing.extend(extra);
                }
            }
            extra => *details = extra,
        }

        self
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return AppError::not_found("Row not found", json!({}));
        }

        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}
