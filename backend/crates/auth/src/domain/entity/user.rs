//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, preferences::Preferences,
    user_password::UserPassword,
};

/// User entity
///
/// `password_hash` never leaves the auth crate: no DTO carries it and its
/// `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Unique, case-exact
    pub email: Email,
    pub name: DisplayName,
    pub password_hash: UserPassword,
    pub profile_image_url: Option<String>,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with default preferences
    pub fn new(
        email: Email,
        name: DisplayName,
        password_hash: UserPassword,
        profile_image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            email,
            name,
            password_hash,
            profile_image_url,
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
