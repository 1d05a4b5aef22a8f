//! # User Repository
//!
//! Database operations for accounts. Users are seeded at first run and never
//! edited or deleted, so this is the smallest repository: credential lookup
//! plus the inserts seeding needs.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use lavka_core::{Role, User};

const USER_COLUMNS: &str = "id, username, password, role";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks up a user by exact username/password match.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - credentials match
    /// * `Ok(None)` - no such user or wrong password
    ///
    /// ## Security Note
    /// Cleartext equality comparison: the schema's known-insecure baseline.
    /// A row whose role is outside {admin, user} fails to decode and is
    /// reported as an error, never silently treated as a regular user.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<User>> {
        debug!(username = %username, "authenticating user");

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1 AND password = ?2"
        ))
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user row (seed path only: there is no account
    /// management surface).
    ///
    /// ## Returns
    /// * `Ok(id)` - rowid of the inserted user
    /// * `Err(DbError::UniqueViolation)` - username already exists
    pub async fn insert(&self, username: &str, password: &str, role: Role) -> DbResult<i64> {
        debug!(username = %username, role = %role, "inserting user");

        let result =
            sqlx::query("INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)")
                .bind(username)
                .bind(password)
                .bind(role.as_str())
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use lavka_core::Role;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_seeded_accounts_authenticate() {
        let db = test_db().await;

        let admin = db
            .users()
            .find_by_credentials("admin", "admin")
            .await
            .unwrap()
            .expect("seeded admin must exist");
        assert_eq!(admin.role, Role::Admin);

        let user = db
            .users()
            .find_by_credentials("user", "user")
            .await
            .unwrap()
            .expect("seeded user must exist");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_wrong_password_is_none() {
        let db = test_db().await;

        let missing = db
            .users()
            .find_by_credentials("admin", "hunter2")
            .await
            .unwrap();
        assert!(missing.is_none());

        let unknown = db
            .users()
            .find_by_credentials("nobody", "nobody")
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;

        let err = db
            .users()
            .insert("admin", "other", Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_unrecognized_role_is_an_error() {
        let db = test_db().await;

        // Simulate a hand-edited row with a role outside the closed set.
        sqlx::query("INSERT INTO users (username, password, role) VALUES ('m', 'm', 'manager')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db
            .users()
            .find_by_credentials("m", "m")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
    }
}
