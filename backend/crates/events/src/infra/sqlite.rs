//! SQLite Hackathon Store

use chrono::{DateTime, Utc};
use kernel::id::HackathonId;
use sqlx::SqlitePool;

use crate::domain::hackathon::{Hackathon, HackathonFields};
use crate::domain::repository::HackathonRepository;
use crate::error::{EventError, EventResult};

/// SQLite-backed hackathon record store
#[derive(Clone)]
pub struct SqliteHackathonRepository {
    pool: SqlitePool,
}

impl SqliteHackathonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HackathonRepository for SqliteHackathonRepository {
    async fn insert(&self, record: &Hackathon) -> EventResult<()> {
        sqlx::query(
            r#"
            INSERT INTO hackathons (
                id,
                name,
                organizer,
                location,
                mode,
                ppt_needed,
                registered,
                start_date,
                end_date,
                team_size,
                team_code,
                link,
                created_by,
                modified_by,
                created_at,
                modified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.fields.name)
        .bind(record.fields.organizer.as_deref())
        .bind(record.fields.location.as_deref())
        .bind(record.fields.mode.as_deref())
        .bind(record.fields.ppt_needed.as_deref())
        .bind(record.fields.registered.as_deref())
        .bind(record.fields.start_date.as_deref())
        .bind(record.fields.end_date.as_deref())
        .bind(record.fields.team_size)
        .bind(record.fields.team_code.as_deref())
        .bind(record.fields.link.as_deref())
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .bind(record.created_at)
        .bind(record.modified_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &HackathonId) -> EventResult<Option<Hackathon>> {
        let row = sqlx::query_as::<_, HackathonRow>(
            r#"
            SELECT
                id, name, organizer, location, mode, ppt_needed, registered,
                start_date, end_date, team_size, team_code, link,
                created_by, modified_by, created_at, modified_at
            FROM hackathons
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn update(&self, record: &Hackathon) -> EventResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE hackathons
            SET name = $1,
                organizer = $2,
                location = $3,
                mode = $4,
                ppt_needed = $5,
                registered = $6,
                start_date = $7,
                end_date = $8,
                team_size = $9,
                team_code = $10,
                link = $11,
                modified_by = $12,
                modified_at = $13
            WHERE id = $14
            "#,
        )
        .bind(&record.fields.name)
        .bind(record.fields.organizer.as_deref())
        .bind(record.fields.location.as_deref())
        .bind(record.fields.mode.as_deref())
        .bind(record.fields.ppt_needed.as_deref())
        .bind(record.fields.registered.as_deref())
        .bind(record.fields.start_date.as_deref())
        .bind(record.fields.end_date.as_deref())
        .bind(record.fields.team_size)
        .bind(record.fields.team_code.as_deref())
        .bind(record.fields.link.as_deref())
        .bind(&record.modified_by)
        .bind(record.modified_at)
        .bind(record.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &HackathonId) -> EventResult<()> {
        let result = sqlx::query("DELETE FROM hackathons WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound);
        }
        Ok(())
    }

    async fn list_newest_first(&self) -> EventResult<Vec<Hackathon>> {
        let rows = sqlx::query_as::<_, HackathonRow>(
            r#"
            SELECT
                id, name, organizer, location, mode, ppt_needed, registered,
                start_date, end_date, team_size, team_code, link,
                created_by, modified_by, created_at, modified_at
            FROM hackathons
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_record()).collect()
    }
}

// ============================================================================
// Row type
// ============================================================================

#[derive(sqlx::FromRow)]
struct HackathonRow {
    id: String,
    name: String,
    organizer: Option<String>,
    location: Option<String>,
    mode: Option<String>,
    ppt_needed: Option<String>,
    registered: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    team_size: Option<i64>,
    team_code: Option<String>,
    link: Option<String>,
    created_by: String,
    modified_by: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl HackathonRow {
    fn into_record(self) -> EventResult<Hackathon> {
        let id: HackathonId = self
            .id
            .parse()
            .map_err(|_| EventError::Internal(format!("invalid stored id: {}", self.id)))?;

        Ok(Hackathon {
            id,
            fields: HackathonFields {
                name: self.name,
                organizer: self.organizer,
                location: self.location,
                mode: self.mode,
                ppt_needed: self.ppt_needed,
                registered: self.registered,
                start_date: self.start_date,
                end_date: self.end_date,
                team_size: self.team_size,
                team_code: self.team_code,
                link: self.link,
            },
            created_by: self.created_by,
            modified_by: self.modified_by,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }
}
