//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{User, UserSummary};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// "Remember me": stretches the session from 8 hours to 30 days
    #[serde(default)]
    pub remember: bool,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub expires_at: i64,
}

// ============================================================================
// Register
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Advisory flag; grants nothing until an admin approves it
    #[serde(default)]
    pub request_admin: bool,
}

/// Registration response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub username: String,
    pub role: String,
    pub request_admin: bool,
}

// ============================================================================
// Validate
// ============================================================================

/// Session validation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

// ============================================================================
// User management (admin)
// ============================================================================

/// Listing entry for GET /users; never carries password material
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListEntry {
    pub username: String,
    pub role: String,
    pub request_admin: bool,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub modified_at: DateTime<Utc>,
}

impl From<UserSummary> for UserListEntry {
    fn from(summary: UserSummary) -> Self {
        Self {
            username: summary.username,
            role: summary.role.code().to_string(),
            request_admin: summary.request_admin,
            created_by: summary.created_by,
            modified_by: summary.modified_by,
            modified_at: summary.modified_at,
        }
    }
}

/// Admin user-creation request; the role is explicit here
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Admin user-update request; only these two fields are mutable
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Response for user create/update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub username: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            role: user.role.code().to_string(),
        }
    }
}

// ============================================================================
// Generic
// ============================================================================

/// Simple message envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}
