//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::hackathon::{Hackathon, HackathonFields};

/// Caller-supplied record fields for create and update
///
/// Only the name is required; everything else is organizer free text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonPayload {
    pub name: String,
    pub organizer: Option<String>,
    pub location: Option<String>,
    pub mode: Option<String>,
    pub ppt_needed: Option<String>,
    pub registered: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub team_size: Option<i64>,
    pub team_code: Option<String>,
    pub link: Option<String>,
}

impl From<HackathonPayload> for HackathonFields {
    fn from(payload: HackathonPayload) -> Self {
        Self {
            name: payload.name,
            organizer: payload.organizer,
            location: payload.location,
            mode: payload.mode,
            ppt_needed: payload.ppt_needed,
            registered: payload.registered,
            start_date: payload.start_date,
            end_date: payload.end_date,
            team_size: payload.team_size,
            team_code: payload.team_code,
            link: payload.link,
        }
    }
}

/// Stored record as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonResponse {
    pub id: String,
    pub name: String,
    pub organizer: Option<String>,
    pub location: Option<String>,
    pub mode: Option<String>,
    pub ppt_needed: Option<String>,
    pub registered: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub team_size: Option<i64>,
    pub team_code: Option<String>,
    pub link: Option<String>,
    pub created_by: String,
    pub modified_by: String,
    pub modified_at: DateTime<Utc>,
}

impl From<&Hackathon> for HackathonResponse {
    fn from(record: &Hackathon) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.fields.name.clone(),
            organizer: record.fields.organizer.clone(),
            location: record.fields.location.clone(),
            mode: record.fields.mode.clone(),
            ppt_needed: record.fields.ppt_needed.clone(),
            registered: record.fields.registered.clone(),
            start_date: record.fields.start_date.clone(),
            end_date: record.fields.end_date.clone(),
            team_size: record.fields.team_size,
            team_code: record.fields.team_code.clone(),
            link: record.fields.link.clone(),
            created_by: record.created_by.clone(),
            modified_by: record.modified_by.clone(),
            modified_at: record.modified_at,
        }
    }
}

/// Simple message envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}
