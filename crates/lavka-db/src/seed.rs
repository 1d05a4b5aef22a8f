//! # Default Seed Rows
//!
//! First-run data: two accounts and three catalog entries. Ensured on every
//! startup with `INSERT OR IGNORE` keyed on the unique columns (username,
//! product name), so opening the store is idempotent: existing rows,
//! including any later edits to stock, are left alone.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Accounts present after first run: `(username, password, role)`.
///
/// Cleartext credentials reproduce the schema's known-insecure baseline.
pub const DEFAULT_USERS: &[(&str, &str, &str)] =
    &[("admin", "admin", "admin"), ("user", "user", "user")];

/// Catalog present after first run: `(name, price_cents, stock, category)`.
pub const DEFAULT_PRODUCTS: &[(&str, i64, i64, &str)] = &[
    ("цветы", 35_000, 10, "цветы"),
    ("аксессуар", 15_000, 25, "аксессуар"),
    ("упаковка", 12_000, 40, "упаковка"),
];

/// Inserts any missing default rows.
pub async fn ensure_defaults(pool: &SqlitePool) -> DbResult<()> {
    for (username, password, role) in DEFAULT_USERS {
        sqlx::query("INSERT OR IGNORE INTO users (username, password, role) VALUES (?1, ?2, ?3)")
            .bind(username)
            .bind(password)
            .bind(role)
            .execute(pool)
            .await?;
    }

    for (name, price_cents, stock, category) in DEFAULT_PRODUCTS {
        sqlx::query(
            "INSERT OR IGNORE INTO products (name, price_cents, stock, category) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(price_cents)
        .bind(stock)
        .bind(category)
        .execute(pool)
        .await?;
    }

    debug!(
        users = DEFAULT_USERS.len(),
        products = DEFAULT_PRODUCTS.len(),
        "default rows ensured"
    );

    Ok(())
}
