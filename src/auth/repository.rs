// User persistence: the store seam and its PostgreSQL implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{NewUser, ProfileUpdate, Role, User},
};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, role, \
     email_verified, verification_code, created_at, updated_at";

/// Everything the auth service and user administration need from storage.
/// The store exclusively owns user rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-insensitive lookup
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError>;

    /// Unique violations surface as `DuplicateUser`
    async fn create_user(&self, user: NewUser) -> Result<User, AuthError>;

    async fn update_verification_code(&self, user_id: i32, code: &str) -> Result<(), AuthError>;

    /// Marks the user verified and clears the code in one conditional
    /// statement. Returns false when no row matched the email and code.
    async fn verify_email(&self, email: &str, code: &str) -> Result<bool, AuthError>;

    async fn list_users(&self) -> Result<Vec<User>, AuthError>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AuthError>;

    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> Result<Option<User>, AuthError>;

    async fn update_role(&self, user_id: i32, role: Role) -> Result<Option<User>, AuthError>;

    /// Returns false when the user did not exist
    async fn delete_user(&self, user_id: i32) -> Result<bool, AuthError>;
}

/// User repository for database operations
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AuthError> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, phone, role,
                               email_verified, verification_code)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.role)
        .bind(&user.verification_code)
        .fetch_one(&self.pool)
        .await;

        created.map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::DuplicateUser;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })
    }

    async fn update_verification_code(&self, user_id: i32, code: &str) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET verification_code = $1, updated_at = NOW() WHERE id = $2")
            .bind(code)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn verify_email(&self, email: &str, code: &str) -> Result<bool, AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email_verified = TRUE, verification_code = NULL, updated_at = NOW()
            WHERE LOWER(email) = LOWER($1) AND verification_code = $2
            "#,
        )
        .bind(email)
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE role = $1 ORDER BY id",
            USER_COLUMNS
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                phone = COALESCE($3, phone),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_role(&self, user_id: i32, role: Role) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(role)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, user_id: i32) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
