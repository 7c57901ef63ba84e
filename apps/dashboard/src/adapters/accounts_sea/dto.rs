//! DTOs for accounts_sea adapter.

use crate::entities::accounts::AccountRole;

/// DTO for creating a new account.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub auth_id: String,
    pub email: String,
    pub username: Option<String>,
    pub role: AccountRole,
}

impl AccountCreate {
    pub fn new(auth_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            auth_id: auth_id.into(),
            email: email.into(),
            username: None,
            role: AccountRole::Player,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = role;
        self
    }
}
