use std::fmt;

use crate::domain::store::{EntityId, Identifiable};

/// Registered user. The store owns every instance and assigns `id`.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    /// Stored and compared as plaintext.
    pub password: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
}

impl User {
    /// Build a user that has not been stored yet (`id == 0`).
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            username: username.into(),
            password: password.into(),
            email: email.into(),
            name: name.into(),
            last_name: last_name.into(),
        }
    }

    /// "Name LastName", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }
}

impl Identifiable for User {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

// Keeps the password out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .finish()
    }
}
