//! User account model.

use chrono::{DateTime, Utc};
use tradepost_core::{Role, UserId, Username};

/// An account holder.
///
/// The password hash is deliberately not part of this type; it never leaves
/// the repository layer except through
/// [`UserRepository::get_password_hash`](crate::db::UserRepository::get_password_hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user may manage the product catalog.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
