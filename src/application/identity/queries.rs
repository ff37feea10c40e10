//! Read-side projections of the user store.

use crate::domain::{EntityId, User};

/// Listing shape of a user. Deliberately has no password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            name: u.name,
            last_name: u.last_name,
        }
    }
}
