use crate::domain::models::{
    guest::{Guest, GuestListFilter, GuestWithInvitation, RsvpSummary},
    invitation::PendingReminder,
};
use crate::domain::ports::GuestRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

const LIST_SELECT: &str = "SELECT g.*, i.token, i.whatsapp_link, i.sent_at, i.opened_at \
    FROM guests g LEFT JOIN invitations i ON i.guest_id = g.id";

pub struct PostgresGuestRepo {
    pool: PgPool,
}

impl PostgresGuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &GuestListFilter) {
        if let Some(status) = filter.status {
            qb.push(" AND g.rsvp_status = ").push_bind(status);
        }
        if let Some(search) = &filter.search {
            // pg_trgm fuzzy match on the Hebrew name, substring match on the
            // transliteration; either hit qualifies.
            qb.push(" AND (g.name_hebrew % ")
                .push_bind(search.clone())
                .push(" OR g.name_transliteration ILIKE ")
                .push_bind(format!("%{search}%"))
                .push(")");
        }
    }
}

#[async_trait]
impl GuestRepository for PostgresGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, event_id, name_hebrew, name_transliteration, email, phone, rsvp_status, dietary_preference, dietary_notes, accessibility_needs, table_number, seat_number, relationship_group, plus_one_allowance, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) RETURNING *",
        )
        .bind(&guest.id)
        .bind(&guest.event_id)
        .bind(&guest.name_hebrew)
        .bind(&guest.name_transliteration)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(guest.rsvp_status)
        .bind(guest.dietary_preference)
        .bind(&guest.dietary_notes)
        .bind(&guest.accessibility_needs)
        .bind(guest.table_number)
        .bind(guest.seat_number)
        .bind(guest.relationship_group)
        .bind(guest.plus_one_allowance)
        .bind(guest.created_at)
        .bind(guest.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_owned(&self, organizer_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            "SELECT g.* FROM guests g JOIN events e ON e.id = g.event_id \
             WHERE g.id = $1 AND e.organizer_id = $2 AND e.deleted_at IS NULL",
        )
        .bind(id)
        .bind(organizer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list(
        &self,
        event_id: &str,
        filter: &GuestListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GuestWithInvitation>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(LIST_SELECT);
        qb.push(" WHERE g.event_id = ").push_bind(event_id);
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY g.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<GuestWithInvitation>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count(&self, event_id: &str, filter: &GuestListFilter) -> Result<i64, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM guests g WHERE g.event_id = ");
        qb.push_bind(event_id);
        Self::push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn rsvp_summary(&self, event_id: &str) -> Result<RsvpSummary, AppError> {
        sqlx::query_as::<_, RsvpSummary>(
            "SELECT \
               COUNT(*) FILTER (WHERE rsvp_status = 'pending')   AS pending, \
               COUNT(*) FILTER (WHERE rsvp_status = 'confirmed') AS confirmed, \
               COUNT(*) FILTER (WHERE rsvp_status = 'declined')  AS declined, \
               COUNT(*)                                          AS total \
             FROM guests WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn count_confirmed(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM guests WHERE event_id = $1 AND rsvp_status = 'confirmed'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET name_hebrew = $1, name_transliteration = $2, email = $3, phone = $4, rsvp_status = $5, dietary_preference = $6, dietary_notes = $7, accessibility_needs = $8, table_number = $9, seat_number = $10, relationship_group = $11, plus_one_allowance = $12, updated_at = $13 \
             WHERE id = $14 RETURNING *",
        )
        .bind(&guest.name_hebrew)
        .bind(&guest.name_transliteration)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(guest.rsvp_status)
        .bind(guest.dietary_preference)
        .bind(&guest.dietary_notes)
        .bind(&guest.accessibility_needs)
        .bind(guest.table_number)
        .bind(guest.seat_number)
        .bind(guest.relationship_group)
        .bind(guest.plus_one_allowance)
        .bind(Utc::now())
        .bind(&guest.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // Hard delete; the invitation row cascades with it.
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("האורח לא נמצא".into()));
        }
        Ok(())
    }

    async fn list_for_export(&self, event_id: &str) -> Result<Vec<GuestWithInvitation>, AppError> {
        sqlx::query_as::<_, GuestWithInvitation>(&format!(
            "{LIST_SELECT} WHERE g.event_id = $1 ORDER BY g.name_hebrew"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_pending_reminders(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<PendingReminder>, AppError> {
        sqlx::query_as::<_, PendingReminder>(
            "SELECT g.id AS guest_id, g.name_hebrew, g.phone, i.token, e.title, e.event_date \
             FROM guests g \
             JOIN invitations i ON i.guest_id = g.id \
             JOIN events e ON e.id = g.event_id \
             WHERE g.rsvp_status = 'pending' AND e.deleted_at IS NULL AND e.event_date > $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
