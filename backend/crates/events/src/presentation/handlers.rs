//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::middleware::CurrentUser;
use kernel::id::HackathonId;

use crate::domain::hackathon::Hackathon;
use crate::domain::repository::HackathonRepository;
use crate::error::{EventError, EventResult};
use crate::presentation::dto::{HackathonPayload, HackathonResponse, MessageResponse};

/// Shared state for event handlers
#[derive(Clone)]
pub struct EventsAppState<R>
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
{
    pub records: Arc<R>,
}

/// GET /api/hackathons - public, newest first
pub async fn list<R>(
    State(state): State<EventsAppState<R>>,
) -> EventResult<Json<Vec<HackathonResponse>>>
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
{
    let records = state.records.list_newest_first().await?;
    Ok(Json(records.iter().map(HackathonResponse::from).collect()))
}

/// GET /api/hackathons/{id} - public
pub async fn get_one<R>(
    State(state): State<EventsAppState<R>>,
    Path(id): Path<String>,
) -> EventResult<Json<HackathonResponse>>
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let record = state
        .records
        .find_by_id(&id)
        .await?
        .ok_or(EventError::NotFound)?;

    Ok(Json(HackathonResponse::from(&record)))
}

/// POST /api/hackathons - editor/admin (enforced by the route guard)
pub async fn create<R>(
    State(state): State<EventsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<HackathonPayload>,
) -> EventResult<(StatusCode, Json<HackathonResponse>)>
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
{
    let record = Hackathon::new(payload.into(), current.username.as_str());
    state.records.insert(&record).await?;

    tracing::info!(
        id = %record.id,
        name = %record.fields.name,
        created_by = %record.created_by,
        "Hackathon created"
    );

    Ok((StatusCode::CREATED, Json(HackathonResponse::from(&record))))
}

/// PUT /api/hackathons/{id} - editor/admin
pub async fn update<R>(
    State(state): State<EventsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<HackathonPayload>,
) -> EventResult<Json<HackathonResponse>>
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let mut record = state
        .records
        .find_by_id(&id)
        .await?
        .ok_or(EventError::NotFound)?;

    record.apply(payload.into(), current.username.as_str());
    state.records.update(&record).await?;

    tracing::info!(
        id = %record.id,
        modified_by = %record.modified_by,
        "Hackathon updated"
    );

    Ok(Json(HackathonResponse::from(&record)))
}

/// DELETE /api/hackathons/{id} - admin only
pub async fn remove<R>(
    State(state): State<EventsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> EventResult<Json<MessageResponse>>
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    state.records.delete(&id).await?;

    tracing::info!(id = %id, actor = %current.username, "Hackathon deleted");

    Ok(Json(MessageResponse {
        message: "Hackathon deleted".to_string(),
    }))
}

/// A malformed id can't name any record, so it reads as a miss
fn parse_id(raw: &str) -> EventResult<HackathonId> {
    raw.parse().map_err(|_| EventError::NotFound)
}
