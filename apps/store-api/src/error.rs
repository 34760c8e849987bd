//! Error types for the CornerStore API.
//!
//! Every handler returns `Result<_, ApiError>`; this module maps each layer's
//! errors onto an HTTP status and a `{code, message}` JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use store_core::{OrderRejection, ValidationError};
use store_db::{DbError, SubmitError};

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what clients receive when a request fails:
/// ```json
/// {
///   "code": "INVALID_ORDER",
///   "message": "Invalid product id: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Order submission refused (bad cashier/product reference, empty order)
    InvalidOrder,
    /// Field-level input validation failed
    ValidationError,
    /// A supplied id references a row that does not exist
    InvalidReference,
    /// The requested resource does not exist
    NotFound,
    /// Unique constraint violation
    Conflict,
    /// Storage failure
    DatabaseError,
}

impl ApiError {
    /// Creates a validation error with a custom message.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates a not-found error for an entity/id pair.
    pub fn not_found(entity: &str, id: i64) -> Self {
        ApiError {
            code: ErrorCode::NotFound,
            message: format!("{entity} not found: {id}"),
        }
    }

    /// Creates an invalid-reference error for an entity/id pair.
    pub fn invalid_reference(entity: &str, id: i64) -> Self {
        ApiError {
            code: ErrorCode::InvalidReference,
            message: format!("Invalid {entity} id: {id}"),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidOrder => StatusCode::BAD_REQUEST,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidReference => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// The three order rejections are caller errors: HTTP 400 with the
/// rejection's own message, never a server error.
impl From<OrderRejection> for ApiError {
    fn from(rejection: OrderRejection) -> Self {
        ApiError {
            code: ErrorCode::InvalidOrder,
            message: rejection.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: err.to_string(),
        }
    }
}

/// Storage errors. NotFound becomes 404; a tripped foreign key becomes 400
/// (the accepted validate-then-write race); everything else is a 500.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let code = match &err {
            DbError::NotFound { .. } => ErrorCode::NotFound,
            DbError::UniqueViolation { .. } => ErrorCode::Conflict,
            DbError::ForeignKeyViolation { .. } => ErrorCode::InvalidReference,
            _ => ErrorCode::DatabaseError,
        };

        ApiError {
            code,
            message: err.to_string(),
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Rejected(rejection) => rejection.into(),
            SubmitError::Validation(validation) => validation.into(),
            SubmitError::Db(db) => db.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_map_to_bad_request() {
        for rejection in [
            OrderRejection::InvalidCashier,
            OrderRejection::EmptyOrder,
            OrderRejection::InvalidProduct(7),
        ] {
            let err: ApiError = rejection.into();
            assert_eq!(err.code, ErrorCode::InvalidOrder);
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }

        let err: ApiError = OrderRejection::InvalidProduct(7).into();
        assert_eq!(err.message, "Invalid product id: 7");
    }

    #[test]
    fn test_error_body_shape() {
        let err: ApiError = OrderRejection::EmptyOrder.into();
        let body = serde_json::to_value(&err).unwrap();

        assert_eq!(body["code"], "INVALID_ORDER");
        assert_eq!(body["message"], "Order must have at least one line item");
    }

    #[test]
    fn test_db_error_mapping() {
        let not_found: ApiError = DbError::not_found("Order", 5).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let fk: ApiError = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(fk.status(), StatusCode::BAD_REQUEST);

        let internal: ApiError = DbError::Internal("boom".to_string()).into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
