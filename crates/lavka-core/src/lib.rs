//! # lavka-core: Pure Business Logic for Lavka
//!
//! This crate is the **heart** of the Lavka ordering system. It contains all
//! business logic as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lavka Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Shell (external)                   │   │
//! │  │    Login Screen ──► Catalog ──► Order Form ──► History          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Store facade calls                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 lavka-db (Database Layer)                       │   │
//! │  │    SQLite pool, migrations, repositories, Store facade          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lavka-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   auth    │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │  Session  │  │   rules   │   │   │
//! │  │   │   Order   │  │  (cents)  │  │Permission │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Role, Product, Order)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`auth`] - Session and role/permission rules
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use lavka_core::money::Money;
//! use lavka_core::types::Role;
//! use lavka_core::auth::Permission;
//!
//! // Create money from minor units (never from floats!)
//! let price = Money::from_cents(35_000); // 350.00
//!
//! // Line totals are plain integer math
//! let total = price * 2;
//! assert_eq!(total.cents(), 70_000);
//!
//! // Role checks are declarative
//! assert!(Role::Admin.permits(Permission::ManageCatalog));
//! assert!(!Role::User.permits(Permission::ViewRevenue));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lavka_core::Money` instead of
// `use lavka_core::money::Money`

pub use auth::{Permission, Session};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product in one order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Can be made configurable in future versions.
pub const MAX_ORDER_QTY: i64 = 999;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a category name.
pub const MAX_CATEGORY_LEN: usize = 100;
