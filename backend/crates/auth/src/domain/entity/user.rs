//! User Entity
//!
//! An account as stored by the user repository. Soft-deleted rows are never
//! returned by repository lookups.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, phone_number::PhoneNumber, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    pub name: UserName,
    /// Unique among non-deleted users
    pub phone_number: PhoneNumber,
    /// Unique among non-deleted users when present
    pub email: Option<Email>,
    pub password: UserPassword,
    pub photo_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn set_name(&mut self, name: UserName) {
        self.name = name;
        self.touch();
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = Some(email);
        self.touch();
    }

    pub fn set_photo_url(&mut self, url: String) {
        self.photo_url = Some(url);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validated data for a user that does not exist yet
///
/// The repository assigns `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub phone_number: PhoneNumber,
    pub email: Option<Email>,
    pub password: UserPassword,
}
