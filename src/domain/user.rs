use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserEmail, UserId, Username};

/// An account known to the application.
///
/// Accounts are provisioned by the external auth service; this crate only
/// reads them to resolve owners and review authors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: UserEmail,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub email: UserEmail,
    pub created_at: NaiveDateTime,
}
