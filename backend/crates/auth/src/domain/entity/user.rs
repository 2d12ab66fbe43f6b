//! User Entity
//!
//! A credential record: username, Argon2 password hash, role, and the
//! bookkeeping stamps of who created and last modified the account.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{UserName, UserRole};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Unique, immutable, case-sensitive key
    pub username: UserName,
    /// Argon2id hash in PHC format; plaintext never reaches this type
    pub password_hash: HashedPassword,
    /// Role (Admin, Editor, Member)
    pub role: UserRole,
    /// Advisory self-service request for admin privileges. Confers nothing
    /// by itself; an admin resolves it through a role update.
    pub request_admin: bool,
    /// Acting principal at creation time
    pub created_by: Option<String>,
    /// Acting principal of the last modification
    pub modified_by: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl User {
    /// Create a user via public self-registration
    ///
    /// The role is always `Member`; `request_admin` is recorded as a flag
    /// only.
    pub fn register(username: UserName, password_hash: HashedPassword, request_admin: bool) -> Self {
        let now = Utc::now();
        let created_by = Some(username.as_str().to_string());

        Self {
            username,
            password_hash,
            role: UserRole::Member,
            request_admin,
            created_by: created_by.clone(),
            modified_by: created_by,
            created_at: now,
            modified_at: now,
        }
    }

    /// Create a user on behalf of an admin, with an explicit role
    pub fn created_by_admin(
        username: UserName,
        password_hash: HashedPassword,
        role: UserRole,
        actor: &UserName,
    ) -> Self {
        let now = Utc::now();
        let actor = Some(actor.as_str().to_string());

        Self {
            username,
            password_hash,
            role,
            request_admin: false,
            created_by: actor.clone(),
            modified_by: actor,
            created_at: now,
            modified_at: now,
        }
    }

    /// Change the role, resolving any pending admin request
    pub fn set_role(&mut self, role: UserRole, actor: &UserName) {
        self.role = role;
        self.request_admin = false;
        self.touch(actor);
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password_hash: HashedPassword, actor: &UserName) {
        self.password_hash = password_hash;
        self.touch(actor);
    }

    fn touch(&mut self, actor: &UserName) {
        self.modified_by = Some(actor.as_str().to_string());
        self.modified_at = Utc::now();
    }

    /// Listing view of this user, without password material
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            username: self.username.as_str().to_string(),
            role: self.role,
            request_admin: self.request_admin,
            created_by: self.created_by.clone(),
            modified_by: self.modified_by.clone(),
            modified_at: self.modified_at,
        }
    }
}

/// User view for listings. Password material never appears here; the
/// credential store returns this type from `list_all` so hashes cannot
/// leak past the repository boundary.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub username: String,
    pub role: UserRole,
    pub request_admin: bool,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub modified_at: DateTime<Utc>,
}
