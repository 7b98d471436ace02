//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, phone_number::PhoneNumber, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Partial unique index on `phone_number` for non-deleted rows
const PHONE_UNIQUE_INDEX: &str = "users_phone_number_active_idx";

/// Partial unique index on `email` for non-deleted rows
const EMAIL_UNIQUE_INDEX: &str = "users_email_active_idx";

const USER_COLUMNS: &str = r#"
    id,
    name,
    phone_number,
    email,
    password_hash,
    photo_url,
    is_deleted,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, predicate: &str, bind: &str) -> AuthResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {predicate} AND is_deleted = FALSE"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

/// Translate a unique violation into the matching conflict
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(PHONE_UNIQUE_INDEX) => return AuthError::PhoneTaken,
                Some(EMAIL_UNIQUE_INDEX) => return AuthError::EmailTaken,
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (name, phone_number, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.name.as_str())
            .bind(user.phone_number.as_str())
            .bind(user.email.as_ref().map(Email::as_str))
            .bind(user.password.as_phc_string())
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_deleted = FALSE");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<Option<User>> {
        self.fetch_one_where("phone_number = $1", phone.as_str())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_where("email = $1", email.as_str()).await
    }

    async fn get_by_id(&self, id: UserId) -> AuthResult<User> {
        self.find_by_id(id).await?.ok_or(AuthError::UserNotFound)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                photo_url = $4,
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user.id.get())
        .bind(user.name.as_str())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.photo_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn soft_delete(&self, id: UserId) -> AuthResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.get())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %id, "User soft-deleted");
        Ok(())
    }

    async fn email_taken_by_other(&self, email: &Email, exclude: UserId) -> AuthResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2 AND is_deleted = FALSE)",
        )
        .bind(email.as_str())
        .bind(exclude.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    phone_number: String,
    email: Option<String>,
    password_hash: String,
    photo_url: Option<String>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::from_raw(self.id),
            name: UserName::from_db(self.name),
            phone_number: PhoneNumber::from_db(self.phone_number),
            email: self.email.map(Email::from_db),
            password: UserPassword::from_phc_string(self.password_hash)?,
            photo_url: self.photo_url,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
