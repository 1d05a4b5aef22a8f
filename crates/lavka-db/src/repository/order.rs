//! # Order Repository
//!
//! Database operations for the purchase ledger.
//!
//! ## Order Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order Transaction                              │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── SELECT product by name ──── absent? ──► ProductNotFound          │
//! │    │                                            (rollback)              │
//! │    ├── stock < qty? ─────────────────────────► InsufficientStock        │
//! │    │                                            (rollback)              │
//! │    ├── INSERT order (total = qty × unit price, timestamp)               │
//! │    │                                                                    │
//! │    ├── UPDATE products SET stock = stock - qty                          │
//! │    │                                                                    │
//! │  COMMIT ──► Order                                                       │
//! │                                                                         │
//! │  Any failure between BEGIN and COMMIT drops the transaction, which      │
//! │  rolls back: the order row and the stock decrement are visible          │
//! │  together or not at all.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! The order row freezes `total` (and the product name) at purchase time.
//! Catalog price changes and deletions never reach back into the ledger.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbResult, StoreResult};
use lavka_core::{CoreError, Money, Order};

const ORDER_COLUMNS: &str = "id, username, product, qty, total_cents AS total, created_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order: one transaction covering the ledger insert and the
    /// stock decrement.
    ///
    /// ## Arguments
    /// * `username` - the buyer (from the authenticated session)
    /// * `product_name` - catalog entry to purchase
    /// * `qty` - units; the caller validates positivity/bounds, the schema's
    ///   CHECK is the last line of defense
    /// * `unit_price` - price the buyer was shown; `total = qty × unit_price`
    ///
    /// ## Returns
    /// * `Ok(Order)` - the recorded purchase
    /// * `Err(Core(ProductNotFound))` - no catalog entry matches; nothing is
    ///   written (a missing product must never yield a phantom decrement)
    /// * `Err(Core(InsufficientStock))` - stock would go negative; nothing
    ///   is written
    pub async fn place_order(
        &self,
        username: &str,
        product_name: &str,
        qty: i64,
        unit_price: Money,
    ) -> StoreResult<Order> {
        debug!(username = %username, product = %product_name, qty = %qty, "placing order");

        let mut tx = self.pool.begin().await?;

        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT id, stock FROM products WHERE name = ?1")
                .bind(product_name)
                .fetch_optional(&mut *tx)
                .await?;

        let (product_id, stock) =
            row.ok_or_else(|| CoreError::ProductNotFound(product_name.to_string()))?;

        if stock < qty {
            return Err(CoreError::InsufficientStock {
                name: product_name.to_string(),
                available: stock,
                requested: qty,
            }
            .into());
        }

        let total = unit_price * qty;
        let created_at = minute_now();

        let inserted = sqlx::query(
            "INSERT INTO orders (username, product, qty, total_cents, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(username)
        .bind(product_name)
        .bind(qty)
        .bind(total.cents())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        // Decrement by id, the row resolved under this transaction.
        sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2")
            .bind(qty)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let order = Order {
            id: inserted.last_insert_rowid(),
            username: username.to_string(),
            product: product_name.to_string(),
            qty,
            total,
            created_at,
        };

        info!(
            order_id = order.id,
            username = %order.username,
            product = %order.product,
            total = %order.total,
            "order placed"
        );

        Ok(order)
    }

    /// Lists a user's orders in insertion order.
    ///
    /// A user with no purchases gets an empty list, never an error.
    pub async fn list_for_user(&self, username: &str) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE username = ?1 ORDER BY id"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Sums order totals for a given calendar date.
    ///
    /// `0` when no orders match: never null, never an error.
    pub async fn revenue_on(&self, date: NaiveDate) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_cents), 0) FROM orders WHERE DATE(created_at) = ?1",
        )
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Sums order totals for today, in the local timezone.
    pub async fn revenue_today(&self) -> DbResult<Money> {
        self.revenue_on(Local::now().date_naive()).await
    }

    /// Counts orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Current local wall clock, truncated to the minute.
///
/// The ledger records purchase times at minute resolution.
fn minute_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use lavka_core::CategoryFilter;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn stock_of(db: &Database, name: &str) -> i64 {
        db.products()
            .get_by_name(name)
            .await
            .unwrap()
            .expect("product must exist")
            .stock
    }

    #[tokio::test]
    async fn test_place_order_records_total_and_decrements_stock() {
        let db = test_db().await;

        let order = db
            .orders()
            .place_order("user", "цветы", 2, Money::from_major_minor(350, 0))
            .await
            .unwrap();

        assert_eq!(order.total, Money::from_major_minor(700, 0));
        assert_eq!(order.qty, 2);
        assert_eq!(order.product, "цветы");
        assert_eq!(stock_of(&db, "цветы").await, 8);

        // The ledger row is visible alongside the decrement
        let orders = db.orders().list_for_user("user").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, Money::from_cents(70_000));
    }

    #[tokio::test]
    async fn test_order_total_is_frozen_against_price_changes() {
        let db = test_db().await;

        let order = db
            .orders()
            .place_order("user", "цветы", 1, Money::from_cents(35_000))
            .await
            .unwrap();

        // Re-price the product after the purchase
        db.products().delete_by_name("цветы").await.unwrap();
        db.products()
            .insert("цветы", Money::from_cents(99_900), 5, "цветы")
            .await
            .unwrap();

        let orders = db.orders().list_for_user("user").await.unwrap();
        assert_eq!(orders[0].id, order.id);
        assert_eq!(orders[0].total, Money::from_cents(35_000));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found_and_writes_nothing() {
        let db = test_db().await;

        let err = db
            .orders()
            .place_order("user", "фантом", 1, Money::from_cents(100))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::ProductNotFound(ref name)) if name == "фантом"
        ));

        // No phantom rows appeared anywhere
        assert_eq!(db.orders().count().await.unwrap(), 0);
        let products = db.products().list(&CategoryFilter::All).await.unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.stock >= 0));
    }

    #[tokio::test]
    async fn test_insufficient_stock_rejected_atomically() {
        let db = test_db().await;

        let err = db
            .orders()
            .place_order("user", "цветы", 11, Money::from_cents(35_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock {
                available: 10,
                requested: 11,
                ..
            })
        ));

        // Neither the order nor the decrement happened
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(stock_of(&db, "цветы").await, 10);
    }

    #[tokio::test]
    async fn test_exact_stock_sells_out_to_zero() {
        let db = test_db().await;

        db.orders()
            .place_order("user", "цветы", 10, Money::from_cents(35_000))
            .await
            .unwrap();
        assert_eq!(stock_of(&db, "цветы").await, 0);

        let err = db
            .orders()
            .place_order("user", "цветы", 1, Money::from_cents(35_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_constraint_failure_mid_transaction_leaves_no_partial_state() {
        let db = test_db().await;

        // qty = 0 passes the stock comparison but violates the ledger's
        // CHECK (qty > 0) on INSERT: a storage failure after BEGIN.
        let err = db
            .orders()
            .place_order("user", "цветы", 0, Money::from_cents(35_000))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Db(_)));

        // The rollback left no order and no stock change
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(stock_of(&db, "цветы").await, 10);
    }

    #[tokio::test]
    async fn test_orders_survive_product_deletion() {
        let db = test_db().await;

        db.orders()
            .place_order("user", "упаковка", 3, Money::from_cents(12_000))
            .await
            .unwrap();
        db.products().delete_by_name("упаковка").await.unwrap();

        // Dangling name reference preserved, not cascaded
        let orders = db.orders().list_for_user("user").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product, "упаковка");
        assert_eq!(orders[0].total, Money::from_cents(36_000));
    }

    #[tokio::test]
    async fn test_history_is_per_user_in_insertion_order() {
        let db = test_db().await;

        db.orders()
            .place_order("user", "цветы", 1, Money::from_cents(35_000))
            .await
            .unwrap();
        db.orders()
            .place_order("другая", "аксессуар", 1, Money::from_cents(15_000))
            .await
            .unwrap();
        db.orders()
            .place_order("user", "аксессуар", 2, Money::from_cents(15_000))
            .await
            .unwrap();

        let orders = db.orders().list_for_user("user").await.unwrap();
        let products: Vec<&str> = orders.iter().map(|o| o.product.as_str()).collect();
        assert_eq!(products, ["цветы", "аксессуар"]);

        let none = db.orders().list_for_user("никто").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_revenue_sums_only_the_given_date() {
        let db = test_db().await;

        // Ledger rows from another day, written directly
        sqlx::query(
            "INSERT INTO orders (username, product, qty, total_cents, created_at) \
             VALUES ('user', 'цветы', 1, 35000, '2001-01-01 10:30:00')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO orders (username, product, qty, total_cents, created_at) \
             VALUES ('user', 'упаковка', 2, 24000, '2001-01-01 16:05:00')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let that_day = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        assert_eq!(
            db.orders().revenue_on(that_day).await.unwrap(),
            Money::from_cents(59_000)
        );

        let day_after = NaiveDate::from_ymd_opt(2001, 1, 2).unwrap();
        assert_eq!(
            db.orders().revenue_on(day_after).await.unwrap(),
            Money::zero()
        );

        // Nothing was sold today, so today's revenue is unaffected by the
        // historical rows
        assert_eq!(db.orders().revenue_today().await.unwrap(), Money::zero());
    }

    #[tokio::test]
    async fn test_revenue_today_includes_fresh_orders() {
        let db = test_db().await;

        db.orders()
            .place_order("user", "цветы", 2, Money::from_cents(35_000))
            .await
            .unwrap();
        db.orders()
            .place_order("user", "аксессуар", 1, Money::from_cents(15_000))
            .await
            .unwrap();

        assert_eq!(
            db.orders().revenue_today().await.unwrap(),
            Money::from_cents(85_000)
        );
    }

    #[test]
    fn test_minute_now_truncates_seconds() {
        let t = minute_now();
        assert_eq!(t.second(), 0);
        assert_eq!(t.nanosecond(), 0);
    }
}
