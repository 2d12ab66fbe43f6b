use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, snapshotted into a session at login time.
///
/// The hierarchy is flat: a guard lists every role it accepts, and `Admin`
/// does not implicitly satisfy a check that names only `Editor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    #[default]
    Member,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Editor => "editor",
            Member => "member",
        }
    }

    /// Parse a role code; `None` for anything outside the fixed set
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "admin" => Some(Admin),
            "editor" => Some(Editor),
            "member" => Some(Member),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
