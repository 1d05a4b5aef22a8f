//! # lavka-db: Database Layer for Lavka
//!
//! This crate provides database access for the Lavka ordering system.
//! It uses SQLite for local storage with sqlx for async operations, and
//! exposes the role-checked [`Store`] facade the presentation shell talks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lavka Data Flow                                 │
//! │                                                                         │
//! │  Shell action (place order, add product, ...)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     lavka-db (THIS CRATE)                       │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────────┐   ┌───────────────┐    ┌──────────────┐     │    │
//! │  │   │    Store     │   │  Repositories │    │  Migrations  │     │    │
//! │  │   │ (store.rs)   │──►│ (user/product │    │  (embedded)  │     │    │
//! │  │   │ role checks, │   │  /order)      │    │ 001_init.sql │     │    │
//! │  │   │ validation   │   │               │    └──────────────┘     │    │
//! │  │   └──────────────┘   └───────┬───────┘                         │    │
//! │  │                             │  Database (pool.rs)              │    │
//! │  └─────────────────────────────┼──────────────────────────────────┘    │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (app.db)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`seed`] - Default users and catalog rows, ensured idempotently
//! - [`error`] - Database and store error types
//! - [`repository`] - Repository implementations (user, product, order)
//! - [`store`] - Shell-facing facade with server-side role checks
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lavka_core::{CategoryFilter, Money};
//! use lavka_db::{DbConfig, Store};
//!
//! // Open (or create) the store: migrations + default seed rows
//! let store = Store::open(DbConfig::new("./app.db")).await?;
//!
//! // Authenticate and act as that session
//! let session = store.authenticate("user", "user").await?;
//! let products = store.list_products(&session, &CategoryFilter::All).await?;
//! let order = store
//!     .place_order(&session, "цветы", 2, Money::from_major_minor(350, 0))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, StoreError};
pub use pool::{Database, DbConfig};
pub use store::Store;

// Repository re-exports for convenience
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
