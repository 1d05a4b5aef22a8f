//! # Session & Authorization
//!
//! Maps an authenticated user to the set of permitted actions.
//!
//! ## Permission Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Role → Permission Matrix                             │
//! │                                                                         │
//! │                     BrowseCatalog  ManageCatalog  ViewRevenue           │
//! │  Role::Admin             ✅             ✅             ✅               │
//! │  Role::User              ✅             ❌             ❌               │
//! │                                                                         │
//! │                     PlaceOrder     ViewOwnOrders                        │
//! │  Role::Admin             ❌             ❌                              │
//! │  Role::User              ✅             ✅                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Checks Run
//! Every privileged `Store` operation takes the [`Session`] and calls
//! [`Session::require`] itself. The data layer cannot be misused by a buggy
//! shell: the trust boundary sits here, not in the UI.
//!
//! There is no session state machine beyond "logged in as role R": the
//! shell holds a `Session` while a user is logged in and drops it on logout.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::{Role, User};

// =============================================================================
// Permission
// =============================================================================

/// An action class a session may or may not perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read the catalog and category list.
    BrowseCatalog,
    /// Add or delete catalog entries.
    ManageCatalog,
    /// Read aggregate revenue.
    ViewRevenue,
    /// Create orders.
    PlaceOrder,
    /// Read one's own order history.
    ViewOwnOrders,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Permission::BrowseCatalog => "browse the catalog",
            Permission::ManageCatalog => "manage the catalog",
            Permission::ViewRevenue => "view revenue",
            Permission::PlaceOrder => "place orders",
            Permission::ViewOwnOrders => "view order history",
        };
        f.write_str(s)
    }
}

impl Role {
    /// Declarative permission check. Purely a lookup table; no state.
    pub const fn permits(self, action: Permission) -> bool {
        matches!(
            (self, action),
            (
                Role::Admin,
                Permission::BrowseCatalog | Permission::ManageCatalog | Permission::ViewRevenue
            ) | (
                Role::User,
                Permission::BrowseCatalog | Permission::PlaceOrder | Permission::ViewOwnOrders
            )
        )
    }
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated identity: who is acting and as which role.
///
/// Produced by `Store::authenticate`; passed back into every privileged
/// operation. Carries no credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Session {
    /// Builds a session for an authenticated user.
    pub fn for_user(user: &User) -> Self {
        Session {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }

    /// Verifies this session may perform `action`.
    ///
    /// ## Returns
    /// * `Ok(())` - action permitted
    /// * `Err(CoreError::Forbidden)` - role does not grant the action
    pub fn require(&self, action: Permission) -> CoreResult<()> {
        if self.role.permits(action) {
            Ok(())
        } else {
            Err(CoreError::Forbidden {
                role: self.role,
                action,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
