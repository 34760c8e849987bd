//! # Error Types
//!
//! Domain-specific error types for store-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  store-core errors (this file)                                         │
//! │  ├── OrderRejection   - Order submission refused (caller error)        │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  store-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  store-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (status + body)          │
//! │                                                                         │
//! │  Flow: OrderRejection / ValidationError → ApiError → 400               │
//! │        DbError → ApiError → 404 / 500                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending id, the field name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Order Rejection
// =============================================================================

/// Reasons an order submission is refused.
///
/// All three are caller errors: the client supplied bad references or an
/// empty order. They surface as 400 responses, are never retried, and are
/// never fatal to the process. The chain short-circuits at the first failure;
/// no aggregation across line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderRejection {
    /// The referenced cashier does not exist.
    #[error("Invalid cashier id")]
    InvalidCashier,

    /// The order carried no line items.
    #[error("Order must have at least one line item")]
    EmptyOrder,

    /// A line item references a product that does not exist.
    /// Carries the first offending product id.
    #[error("Invalid product id: {0}")]
    InvalidProduct(i64),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(OrderRejection::InvalidCashier.to_string(), "Invalid cashier id");
        assert_eq!(
            OrderRejection::EmptyOrder.to_string(),
            "Order must have at least one line item"
        );
        assert_eq!(
            OrderRejection::InvalidProduct(42).to_string(),
            "Invalid product id: 42"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }
}
