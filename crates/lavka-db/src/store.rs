//! # Store Facade
//!
//! The shell-facing interface: authentication plus every catalog, order,
//! and revenue operation, with role checks enforced **here**, not in the UI.
//!
//! ## Trust Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Authorization Lives                            │
//! │                                                                         │
//! │  Presentation shell (untrusted)                                         │
//! │       │  holds a Session while a user is logged in                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │  Store (THIS MODULE)                                            │    │
//! │  │                                                                 │    │
//! │  │  every privileged call:                                         │    │
//! │  │    1. session.require(permission)   ← server-side check         │    │
//! │  │    2. validate inputs                                           │    │
//! │  │    3. repository call                                           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  A buggy or malicious shell cannot reach a privileged write without     │
//! │  a session whose role grants it.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identity flows the same way: `place_order` and `my_orders` act on the
//! session's username: there is no parameter to order on someone else's
//! behalf.

use tracing::{debug, info};

use crate::error::{DbError, StoreError, StoreResult};
use crate::pool::{Database, DbConfig};
use lavka_core::validation::{
    validate_category, validate_price, validate_product_name, validate_quantity, validate_stock,
};
use lavka_core::{CategoryFilter, Money, Order, Permission, Product, Session, ValidationError};

/// The ordering system's storage core.
///
/// Owns the [`Database`] handle for the process lifetime: opened once at
/// startup, closed once at shutdown.
#[derive(Debug, Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Opens (or creates) the store.
    ///
    /// Idempotent: ensures the schema exists and seeds the default users and
    /// products if absent. The only failure mode is unusable storage, which
    /// is fatal: the process cannot proceed.
    pub async fn open(config: DbConfig) -> StoreResult<Self> {
        let db = Database::new(config).await?;
        Ok(Store { db })
    }

    /// Wraps an already-open database handle (tests, embedding).
    pub fn with_database(db: Database) -> Self {
        Store { db }
    }

    /// The underlying database handle, for diagnostics.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the underlying pool. Call once at shutdown.
    pub async fn close(&self) {
        self.db.close().await;
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticates by exact username/password match.
    ///
    /// ## Returns
    /// * `Ok(Session)` - logged in; pass the session to every further call
    /// * `Err(InvalidCredentials)` - no matching user; the shell re-prompts
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<Session> {
        let user = self
            .db
            .users()
            .find_by_credentials(username, password)
            .await?
            .ok_or(StoreError::InvalidCredentials)?;

        info!(username = %user.username, role = %user.role, "login");
        Ok(Session::for_user(&user))
    }

    // =========================================================================
    // Catalog (browse: both roles; manage: admin)
    // =========================================================================

    /// Lists distinct categories in first-seen order.
    pub async fn list_categories(&self, session: &Session) -> StoreResult<Vec<String>> {
        session.require(Permission::BrowseCatalog)?;
        Ok(self.db.products().categories().await?)
    }

    /// Lists products, optionally filtered by category, in insertion order.
    pub async fn list_products(
        &self,
        session: &Session,
        filter: &CategoryFilter,
    ) -> StoreResult<Vec<Product>> {
        session.require(Permission::BrowseCatalog)?;
        Ok(self.db.products().list(filter).await?)
    }

    /// Adds a catalog entry. Admin only.
    ///
    /// ## Validation
    /// Non-empty bounded name and category, non-negative price and stock;
    /// a name already in the catalog is rejected as a duplicate.
    pub async fn add_product(
        &self,
        session: &Session,
        name: &str,
        price: Money,
        stock: i64,
        category: &str,
    ) -> StoreResult<Product> {
        session.require(Permission::ManageCatalog)?;

        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;
        validate_category(category)?;

        let name = name.trim();
        let category = category.trim();

        match self.db.products().insert(name, price, stock, category).await {
            Ok(product) => {
                info!(name = %product.name, by = %session.username, "product added");
                Ok(product)
            }
            Err(DbError::UniqueViolation { .. }) => Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: name.to_string(),
            }
            .into()),
            Err(other) => Err(other.into()),
        }
    }

    /// Deletes all catalog entries matching `name` exactly. Admin only.
    ///
    /// A no-op (returning `0`) when nothing matches. Existing orders that
    /// reference the name are untouched: the ledger keeps its history.
    pub async fn delete_product(&self, session: &Session, name: &str) -> StoreResult<u64> {
        session.require(Permission::ManageCatalog)?;

        let deleted = self.db.products().delete_by_name(name).await?;
        info!(name = %name, deleted = deleted, by = %session.username, "product deleted");
        Ok(deleted)
    }

    // =========================================================================
    // Orders (user role)
    // =========================================================================

    /// Places an order as the session user.
    ///
    /// `total = qty × unit_price` is frozen into the ledger; the stock
    /// decrement happens in the same transaction. Quantity is validated
    /// here, the stock bound inside the transaction.
    pub async fn place_order(
        &self,
        session: &Session,
        product_name: &str,
        qty: i64,
        unit_price: Money,
    ) -> StoreResult<Order> {
        session.require(Permission::PlaceOrder)?;

        validate_quantity(qty)?;

        self.db
            .orders()
            .place_order(&session.username, product_name, qty, unit_price)
            .await
    }

    /// The session user's order history, oldest first.
    pub async fn my_orders(&self, session: &Session) -> StoreResult<Vec<Order>> {
        session.require(Permission::ViewOwnOrders)?;
        Ok(self.db.orders().list_for_user(&session.username).await?)
    }

    // =========================================================================
    // Revenue (admin)
    // =========================================================================

    /// Sum of order totals for today in the local timezone. Admin only.
    ///
    /// Zero when nothing was sold today: never an error.
    pub async fn revenue_today(&self, session: &Session) -> StoreResult<Money> {
        session.require(Permission::ViewRevenue)?;

        let revenue = self.db.orders().revenue_today().await?;
        debug!(revenue = %revenue, "revenue queried");
        Ok(revenue)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lavka_core::CoreError;

    async fn open_store() -> Store {
        Store::open(DbConfig::in_memory()).await.unwrap()
    }

    async fn admin(store: &Store) -> Session {
        store.authenticate("admin", "admin").await.unwrap()
    }

    async fn user(store: &Store) -> Session {
        store.authenticate("user", "user").await.unwrap()
    }

    #[tokio::test]
    async fn test_fresh_store_has_seed_data() {
        let store = open_store().await;

        // Both seeded accounts log in
        let admin = admin(&store).await;
        let user = user(&store).await;

        // Exactly the three seeded products
        let products = store
            .list_products(&admin, &CategoryFilter::All)
            .await
            .unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["цветы", "аксессуар", "упаковка"]);

        // Browsing is open to both roles
        assert!(store
            .list_products(&user, &CategoryFilter::All)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_bad_credentials_rejected() {
        let store = open_store().await;

        let err = store.authenticate("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_add_product_requires_admin() {
        let store = open_store().await;
        let user = user(&store).await;

        let err = store
            .add_product(&user, "лента", Money::from_cents(4000), 10, "упаковка")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_product_validates_and_appears_in_listing() {
        let store = open_store().await;
        let admin = admin(&store).await;

        let added = store
            .add_product(&admin, "лента", Money::from_cents(4000), 10, "упаковка")
            .await
            .unwrap();
        assert_eq!(added.name, "лента");

        let listed = store
            .list_products(&admin, &CategoryFilter::All)
            .await
            .unwrap();
        assert!(listed.iter().any(|p| p.name == "лента"
            && p.price == Money::from_cents(4000)
            && p.stock == 10
            && p.category == "упаковка"));

        // Rejections: empty name, negative price, negative stock, duplicate
        assert!(store
            .add_product(&admin, "  ", Money::from_cents(1), 1, "x")
            .await
            .is_err());
        assert!(store
            .add_product(&admin, "y", Money::from_cents(-1), 1, "x")
            .await
            .is_err());
        assert!(store
            .add_product(&admin, "y", Money::from_cents(1), -1, "x")
            .await
            .is_err());
        let dup = store
            .add_product(&admin, "лента", Money::from_cents(1), 1, "x")
            .await
            .unwrap_err();
        assert!(matches!(
            dup,
            StoreError::Core(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_product_is_admin_only_and_noop_safe() {
        let store = open_store().await;
        let admin = admin(&store).await;
        let user = user(&store).await;

        assert!(store.delete_product(&user, "цветы").await.is_err());

        assert_eq!(store.delete_product(&admin, "упаковка").await.unwrap(), 1);
        assert_eq!(store.delete_product(&admin, "упаковка").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_place_order_end_to_end() {
        let store = open_store().await;
        let user = user(&store).await;

        let order = store
            .place_order(&user, "цветы", 2, Money::from_major_minor(350, 0))
            .await
            .unwrap();
        assert_eq!(order.total, Money::from_major_minor(700, 0));
        assert_eq!(order.username, "user");

        let history = store.my_orders(&user).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].product, "цветы");
    }

    #[tokio::test]
    async fn test_ordering_is_user_only_and_validated() {
        let store = open_store().await;
        let admin = admin(&store).await;
        let user = user(&store).await;

        // Admin sessions do not place orders
        let err = store
            .place_order(&admin, "цветы", 1, Money::from_cents(35_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Forbidden { .. })
        ));

        // Quantity must be positive: caught before any storage access
        let err = store
            .place_order(&user, "цветы", 0, Money::from_cents(35_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(
                ValidationError::MustBePositive { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_revenue_is_admin_only_and_defaults_to_zero() {
        let store = open_store().await;
        let admin = admin(&store).await;
        let user = user(&store).await;

        assert!(store.revenue_today(&user).await.is_err());
        assert_eq!(store.revenue_today(&admin).await.unwrap(), Money::zero());

        store
            .place_order(&user, "аксессуар", 2, Money::from_cents(15_000))
            .await
            .unwrap();
        assert_eq!(
            store.revenue_today(&admin).await.unwrap(),
            Money::from_cents(30_000)
        );
    }

    #[tokio::test]
    async fn test_categories_through_facade() {
        let store = open_store().await;
        let admin = admin(&store).await;

        store
            .add_product(&admin, "роза", Money::from_cents(25_000), 50, "цветы")
            .await
            .unwrap();

        let categories = store.list_categories(&admin).await.unwrap();
        assert_eq!(categories, ["цветы", "аксессуар", "упаковка"]);
    }

    #[tokio::test]
    async fn test_deleting_product_keeps_order_history() {
        let store = open_store().await;
        let admin = admin(&store).await;
        let user = user(&store).await;

        store
            .place_order(&user, "упаковка", 1, Money::from_cents(12_000))
            .await
            .unwrap();
        store.delete_product(&admin, "упаковка").await.unwrap();

        let listed = store
            .list_products(&admin, &CategoryFilter::All)
            .await
            .unwrap();
        assert!(listed.iter().all(|p| p.name != "упаковка"));

        let history = store.my_orders(&user).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].product, "упаковка");
    }
}
