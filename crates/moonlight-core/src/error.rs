//! # Error Types
//!
//! Domain-specific error types for moonlight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  moonlight-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  moonlight-db errors (separate crate)                                   │
//! │  ├── DbError                      - Persistence failures                │
//! │  └── DbError::ForeignKeyViolation - Referential constraint failures     │
//! │                                                                         │
//! │  moonlight-app errors                                                   │
//! │  └── AppError         - What callers of the workflows see               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → Caller        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are caught at the
/// operation boundary and surfaced with their message text intact.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the session's product snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds known availability.
    ///
    /// `requested` is the quantity the cart would hold after the add, so a
    /// repeat add of the same product reports the merged amount.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Payment exceeds the customer's outstanding balance at submission time.
    #[error("Payment amount cannot exceed outstanding balance ({balance} outstanding, {amount} offered)")]
    PaymentExceedsBalance { balance: String, amount: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs or any row is written.
#[derive(Debug, Error)]
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

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID, malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
