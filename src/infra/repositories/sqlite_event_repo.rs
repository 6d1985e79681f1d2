use crate::domain::models::{
    enums::EventStatus,
    event::{Event, EventWithCounts},
};
use crate::domain::ports::EventRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const WITH_COUNTS: &str = "SELECT e.*, \
    (SELECT COUNT(*) FROM guests g WHERE g.event_id = e.id AND g.rsvp_status = 'confirmed') AS rsvp_confirmed, \
    (SELECT COUNT(*) FROM guests g WHERE g.event_id = e.id AND g.rsvp_status = 'pending') AS rsvp_pending, \
    (SELECT COUNT(*) FROM guests g WHERE g.event_id = e.id AND g.rsvp_status = 'declined') AS rsvp_declined, \
    (SELECT COUNT(*) FROM guests g WHERE g.event_id = e.id) AS rsvp_total \
    FROM events e";

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, organizer_id, title, event_date, venue_name, venue_address, description, max_guests, venue_capacity, status, deleted_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&event.id)
        .bind(&event.organizer_id)
        .bind(&event.title)
        .bind(event.event_date)
        .bind(&event.venue_name)
        .bind(&event.venue_address)
        .bind(&event.description)
        .bind(event.max_guests)
        .bind(event.venue_capacity)
        .bind(event.status)
        .bind(event.deleted_at)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_owned(&self, organizer_id: &str, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = ? AND organizer_id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(organizer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_any(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_owned_with_counts(
        &self,
        organizer_id: &str,
        id: &str,
    ) -> Result<Option<EventWithCounts>, AppError> {
        sqlx::query_as::<_, EventWithCounts>(&format!(
            "{WITH_COUNTS} WHERE e.id = ? AND e.organizer_id = ? AND e.deleted_at IS NULL"
        ))
        .bind(id)
        .bind(organizer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_with_counts(
        &self,
        organizer_id: &str,
        status: Option<EventStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventWithCounts>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(WITH_COUNTS);
        qb.push(" WHERE e.organizer_id = ").push_bind(organizer_id);
        qb.push(" AND e.deleted_at IS NULL");
        if let Some(status) = status {
            qb.push(" AND e.status = ").push_bind(status);
        }
        qb.push(" ORDER BY e.event_date ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<EventWithCounts>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count(&self, organizer_id: &str, status: Option<EventStatus>) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM events e WHERE e.organizer_id = ");
        qb.push_bind(organizer_id);
        qb.push(" AND e.deleted_at IS NULL");
        if let Some(status) = status {
            qb.push(" AND e.status = ").push_bind(status);
        }

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = ?, event_date = ?, venue_name = ?, venue_address = ?, description = ?, max_guests = ?, venue_capacity = ?, status = ?, deleted_at = ?, updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&event.title)
        .bind(event.event_date)
        .bind(&event.venue_name)
        .bind(&event.venue_address)
        .bind(&event.description)
        .bind(event.max_guests)
        .bind(event.venue_capacity)
        .bind(event.status)
        .bind(event.deleted_at)
        .bind(Utc::now())
        .bind(&event.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn soft_delete(&self, organizer_id: &str, id: &str) -> Result<(), AppError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE events SET deleted_at = ?, status = ?, updated_at = ? \
             WHERE id = ? AND organizer_id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(EventStatus::Cancelled)
        .bind(now)
        .bind(id)
        .bind(organizer_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("האירוע לא נמצא".into()));
        }
        Ok(())
    }
}
