//! Hackathon Record Entity
//!
//! A free-form event record. Apart from the name, every field is optional
//! text the organizers fill in however they like; the server validates
//! nothing beyond presence. What the server does own are the bookkeeping
//! stamps: who created the record, who touched it last, and when.

use chrono::{DateTime, Utc};
use kernel::id::HackathonId;

/// The caller-supplied portion of a record
#[derive(Debug, Clone)]
pub struct HackathonFields {
    pub name: String,
    pub organizer: Option<String>,
    pub location: Option<String>,
    /// Online / Offline / Hybrid, free text
    pub mode: Option<String>,
    pub ppt_needed: Option<String>,
    pub registered: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub team_size: Option<i64>,
    pub team_code: Option<String>,
    pub link: Option<String>,
}

/// Hackathon record entity
#[derive(Debug, Clone)]
pub struct Hackathon {
    pub id: HackathonId,
    pub fields: HackathonFields,
    /// Username of the session that created the record
    pub created_by: String,
    /// Username of the session behind the last write
    pub modified_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Hackathon {
    /// Create a record, stamped with the acting principal
    pub fn new(fields: HackathonFields, actor: &str) -> Self {
        let now = Utc::now();
        Self {
            id: HackathonId::new(),
            fields,
            created_by: actor.to_string(),
            modified_by: actor.to_string(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Replace the caller-supplied fields, restamping the modifier
    pub fn apply(&mut self, fields: HackathonFields, actor: &str) {
        self.fields = fields;
        self.modified_by = actor.to_string();
        self.modified_at = Utc::now();
    }
}
