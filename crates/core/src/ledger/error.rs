//! Ledger error types.
//!
//! Three failures reach callers of the repositories: a draft that fails its
//! rules, an id that does not exist, and a backend that failed. The service
//! layer adds a fourth for principals lacking a permission.

use sarraf_shared::auth::Permission;
use sarraf_shared::error::AppError;
use sarraf_shared::types::UserId;
use thiserror::Error;

use super::validation::ValidationError;
use crate::gateway::GatewayError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A submitted draft failed validation. Nothing was written.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The operation targets an id that does not exist.
    #[error("No record {id} in {collection}")]
    NotFound {
        /// Logical collection name.
        collection: String,
        /// Requested id.
        id: String,
    },

    /// The backend failed or holds unreadable data.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The principal lacks the permission the operation needs.
    #[error("User {user} lacks permission {permission}")]
    PermissionDenied {
        /// The principal's user id.
        user: UserId,
        /// The missing permission.
        permission: Permission,
    },
}

impl LedgerError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::PermissionDenied { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Persistence(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// The ledger never retries on its own; a persistence failure is handed
    /// to the caller to decide.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::NotFound { .. }
            | Self::Persistence(_)
            | Self::PermissionDenied { .. } => false,
        }
    }
}

impl From<GatewayError> for LedgerError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Persistence(other.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Validation(inner) => Self::Validation(inner.to_string()),
            LedgerError::NotFound { .. } => Self::NotFound(message),
            LedgerError::Persistence(msg) => Self::Persistence(msg),
            LedgerError::PermissionDenied { .. } => Self::Forbidden(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation() -> LedgerError {
        ValidationError::new("amount", "is required").into()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(validation().error_code(), "VALIDATION_ERROR");
        assert_eq!(
            LedgerError::not_found("banks", "x").error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            LedgerError::Persistence("down".into()).error_code(),
            "PERSISTENCE_ERROR"
        );
        assert_eq!(
            LedgerError::PermissionDenied {
                user: UserId::new(),
                permission: Permission::ManageBankTransactions,
            }
            .error_code(),
            "PERMISSION_DENIED"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(validation().http_status_code(), 400);
        assert_eq!(LedgerError::not_found("banks", "x").http_status_code(), 404);
        assert_eq!(
            LedgerError::Persistence("down".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!validation().is_retryable());
        assert!(!LedgerError::Persistence("down".into()).is_retryable());
    }

    #[test]
    fn test_gateway_not_found_stays_not_found() {
        let err: LedgerError = GatewayError::not_found("bankTransactions", "abc").into();
        assert!(matches!(
            err,
            LedgerError::NotFound { ref collection, ref id }
                if collection == "bankTransactions" && id == "abc"
        ));
    }

    #[test]
    fn test_other_gateway_errors_become_persistence() {
        let err: LedgerError = GatewayError::backend("connection refused").into();
        assert_eq!(
            err.to_string(),
            "Persistence error: backend operation failed: connection refused"
        );
        let err: LedgerError = GatewayError::MissingId.into();
        assert!(matches!(err, LedgerError::Persistence(_)));
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = validation().into();
        assert_eq!(app.status_code(), 400);
        let app: AppError = LedgerError::not_found("banks", "x").into();
        assert_eq!(app.status_code(), 404);
        let app: AppError = LedgerError::PermissionDenied {
            user: UserId::new(),
            permission: Permission::ViewDashboard,
        }
        .into();
        assert_eq!(app.status_code(), 403);
    }
}
