//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Listing with an optional category filter (insertion order)
//! - Distinct category listing (first-seen order)
//! - Insert / delete-by-name
//!
//! ## Ordering Guarantee
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Listings are ORDER BY id: storage-insertion order.                     │
//! │                                                                         │
//! │  The shell renders the catalog as rows in a table; deterministic        │
//! │  ordering keeps re-renders stable and tests exact.                      │
//! │                                                                         │
//! │  categories() follows the same rule via GROUP BY ... ORDER BY MIN(id):  │
//! │  each distinct category once, in the order it first entered the         │
//! │  catalog.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use lavka_core::{CategoryFilter, Money, Product};

const PRODUCT_COLUMNS: &str = "id, name, price_cents AS price, stock, category";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// // Whole catalog
/// let all = repo.list(&CategoryFilter::All).await?;
///
/// // One category
/// let flowers = repo.list(&CategoryFilter::Category("цветы".into())).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, optionally filtered by category, in insertion order.
    pub async fn list(&self, filter: &CategoryFilter) -> DbResult<Vec<Product>> {
        let products = match filter {
            CategoryFilter::All => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            CategoryFilter::Category(category) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ?1 ORDER BY id"
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = products.len(), ?filter, "listed products");
        Ok(products)
    }

    /// Lists distinct categories, each exactly once, in first-seen order.
    ///
    /// An empty catalog yields an empty list, never an error.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT category FROM products GROUP BY category ORDER BY MIN(id)",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a product by its (unique) name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the inserted row, with its assigned id
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(
        &self,
        name: &str,
        price: Money,
        stock: i64,
        category: &str,
    ) -> DbResult<Product> {
        debug!(name = %name, price = %price, stock = %stock, category = %category, "inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, price_cents, stock, category) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(price.cents())
        .bind(stock)
        .bind(category)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            price,
            stock,
            category: category.to_string(),
        })
    }

    /// Deletes **all** products whose name matches exactly.
    ///
    /// Orders referencing the name are left untouched: the ledger is
    /// decoupled from the live catalog.
    ///
    /// ## Returns
    /// The number of rows deleted; `0` when nothing matched (a no-op, not an
    /// error).
    pub async fn delete_by_name(&self, name: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        debug!(name = %name, deleted = result.rows_affected(), "deleted products by name");
        Ok(result.rows_affected())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
