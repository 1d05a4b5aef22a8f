//! # Repository Module
//!
//! Database repository implementations for Lavka.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  Store facade                                                           │
//! │       │                                                                 │
//! │       │  db.products().list(&filter)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self, filter)                                                │
//! │  ├── categories(&self)                                                  │
//! │  ├── insert(&self, ...)                                                 │
//! │  └── delete_by_name(&self, name)                                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • Easy to test against an in-memory database                           │
//! │  • Clear separation of concerns                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Credential lookup and seed inserts
//! - [`product::ProductRepository`] - Catalog CRUD and category listing
//! - [`order::OrderRepository`] - Transactional order placement, history,
//!   revenue
//!
//! Repositories return [`crate::error::DbError`] for storage failures;
//! `OrderRepository::place_order` additionally returns domain rejections
//! (product not found, insufficient stock) and therefore uses
//! [`crate::error::StoreError`].

pub mod order;
pub mod product;
pub mod user;
