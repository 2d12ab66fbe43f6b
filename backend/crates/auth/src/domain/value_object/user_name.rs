//! User Name Value Object
//!
//! ユーザー名は、アカウントを識別するための一意キー。
//! ログイン、監査ログ、管理画面の表示に使用される。
//!
//! ## 設計方針
//! - NFKC正規化 → 検証 の順で処理
//! - 大文字・小文字は区別する（正規形への変換は行わない）
//! - 空・制御文字・過剰な長さのみ拒否
//!
//! ## 不変条件
//! - 非空（空白のみも不可）
//! - 長さ: 最大64文字（正規化後）
//! - 制御文字を含まない

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserNameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Username contains invalid control characters")]
    InvalidCharacter,
}

/// User name value object
///
/// Usernames are compared case-sensitively: `Alice` and `alice` are two
/// different accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Create a user name with validation
    ///
    /// Unicode is normalized using NFKC before validation; the normalized
    /// form is what gets stored and compared.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw: String = raw.into();
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = normalized.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
                actual: char_count,
            });
        }

        if normalized.chars().any(|ch| ch.is_control()) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Reconstruct from a stored value, bypassing validation
    ///
    /// Only for rows read back from the credential store, which were
    /// validated on the way in.
    pub(crate) fn from_stored(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
