//! SQLite Credential Store
//!
//! Durable user persistence plus the append-only audit log. SQLite commits
//! synchronously, so every write here is on disk before the call returns.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::SqlitePool;

use crate::domain::entity::{User, UserSummary};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserName, UserRole};
use crate::error::{AuthError, AuthResult};

/// SQLite-backed credential store
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of accounts; used by startup bootstrap
    pub async fn count(&self) -> AuthResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                role,
                request_admin,
                created_by,
                modified_by,
                created_at,
                modified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(user.request_admin)
        .bind(user.created_by.as_deref())
        .bind(user.modified_by.as_deref())
        .bind(user.created_at)
        .bind(user.modified_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // The primary key settles concurrent registrations of the same
            // username; surface the loser as a conflict.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::UserNameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                username,
                password_hash,
                role,
                request_admin,
                created_by,
                modified_by,
                created_at,
                modified_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $1,
                role = $2,
                request_admin = $3,
                modified_by = $4,
                modified_at = $5
            WHERE username = $6
            "#,
        )
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(user.request_admin)
        .bind(user.modified_by.as_deref())
        .bind(user.modified_at)
        .bind(user.username.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, username: &UserName, actor: &UserName) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username.as_str())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Nothing removed, nothing audited
            tx.rollback().await?;
            return Err(AuthError::UserNotFound);
        }

        sqlx::query(
            r#"
            INSERT INTO audit_log (action, target, actor, recorded_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind("user.delete")
        .bind(username.as_str())
        .bind(actor.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_all(&self) -> AuthResult<Vec<UserSummary>> {
        // password_hash is deliberately not selected; the hash never
        // crosses the repository boundary in a listing.
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT
                username,
                role,
                request_admin,
                created_by,
                modified_by,
                modified_at
            FROM users
            ORDER BY username ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_summary()).collect()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    role: String,
    request_admin: bool,
    created_by: Option<String>,
    modified_by: Option<String>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("invalid stored role: {}", self.role)))?;
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            username: UserName::from_stored(self.username),
            password_hash,
            role,
            request_admin: self.request_admin,
            created_by: self.created_by,
            modified_by: self.modified_by,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    username: String,
    role: String,
    request_admin: bool,
    created_by: Option<String>,
    modified_by: Option<String>,
    modified_at: DateTime<Utc>,
}

impl UserSummaryRow {
    fn into_summary(self) -> AuthResult<UserSummary> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("invalid stored role: {}", self.role)))?;

        Ok(UserSummary {
            username: self.username,
            role,
            request_admin: self.request_admin,
            created_by: self.created_by,
            modified_by: self.modified_by,
            modified_at: self.modified_at,
        })
    }
}
