//! # Error Types
//!
//! Domain-specific error types for lavka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lavka-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rule violations                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  lavka-db errors (separate crate)                                       │
//! │  ├── DbError          - Database operation failures                     │
//! │  └── StoreError       - What the shell sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Shell                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::auth::Permission;
use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent domain rule violations. They are recoverable: the shell
/// surfaces them to the user and re-prompts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog entry matches the given name.
    ///
    /// ## When This Occurs
    /// - Ordering a product that was deleted between render and submit
    /// - A stale shell passing a name that never existed
    ///
    /// Resolving the name happens before any write, so a missing product
    /// never produces a phantom row or a zero-row stock decrement.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Not enough stock to cover the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Order (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "цветы", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Shell shows: "Only 3 цветы in stock"
    /// ```
    #[error("insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A role string outside the closed {admin, user} set.
    ///
    /// The set is closed on purpose: an unrecognized role is rejected, never
    /// silently downgraded to `user`.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The session's role does not grant the attempted action.
    #[error("role '{role}' is not permitted to {action}")]
    Forbidden { role: Role, action: Permission },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., duplicate product name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
