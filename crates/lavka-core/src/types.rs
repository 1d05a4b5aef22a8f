//! # Domain Types
//!
//! Core domain types used throughout Lavka.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      User       │   │     Product     │   │      Order      │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │        │
//! │  │  username (UQ)  │   │  name (UQ)      │   │  username       │        │
//! │  │  password       │   │  price (Money)  │   │  product (name) │        │
//! │  │  role           │   │  stock          │   │  qty / total    │        │
//! │  └─────────────────┘   │  category       │   │  created_at     │        │
//! │                        └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │      Role       │   │ CategoryFilter  │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Admin          │   │  All            │                              │
//! │  │  User           │   │  Category(name) │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders reference the user and product by *name* on purpose: the order
//! table is a historical ledger, decoupled from the live catalog. Deleting a
//! product leaves its past orders untouched (dangling name reference).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Account role. The set is closed: exactly these two.
///
/// A role string outside this set (e.g. hand-edited in the database) is an
/// error at read time: it is never silently downgraded to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Catalog management and revenue reporting.
    Admin,
    /// Ordering and personal history.
    User,
}

impl Role {
    /// Stable string form, matching the database column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// An account that can log in.
///
/// Created by seed data at first run; there is no edit or delete surface.
/// Identity is the unique `username`.
///
/// ## Security Note
/// The password is stored and compared in cleartext. This reproduces the
/// known-insecure baseline of the schema; do not extend it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Display name; unique across the catalog.
    pub name: String,

    /// Unit price in minor units.
    pub price: Money,

    /// Current stock level. Mutated only by order placement.
    pub stock: i64,

    /// Free-form category string used for catalog filtering.
    pub category: String,
}

impl Product {
    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Catalog listing filter.
///
/// The shell's "all categories" choice is a typed variant here, not a magic
/// sentinel string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every product, regardless of category.
    All,
    /// Only products whose category matches exactly.
    Category(String),
}

impl CategoryFilter {
    /// Builds a filter from a shell-provided string, treating `"all"` as
    /// [`CategoryFilter::All`].
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(s.to_string())
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A single purchase, recorded once and never mutated.
///
/// `total` is frozen at creation (`qty × unit price at purchase time`);
/// later catalog price changes do not alter past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,

    /// Buyer, by username.
    pub username: String,

    /// Product, by name at purchase time (may dangle after deletion).
    pub product: String,

    /// Units purchased; always positive.
    pub qty: i64,

    /// Frozen line total in minor units.
    pub total: Money,

    /// Local wall clock at purchase, minute resolution.
    pub created_at: NaiveDateTime,
}

// =============================================================================
// Unit Tests
// =============================================================================
