use crate::domain::models::invitation::Invitation;
use crate::domain::ports::InvitationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresInvitationRepo {
    pool: PgPool,
}

impl PostgresInvitationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepo {
    async fn create(&self, invitation: &Invitation) -> Result<Invitation, AppError> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO invitations (id, event_id, guest_id, token, channel, whatsapp_link, sent_at, opened_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&invitation.id)
        .bind(&invitation.event_id)
        .bind(&invitation.guest_id)
        .bind(&invitation.token)
        .bind(&invitation.channel)
        .bind(&invitation.whatsapp_link)
        .bind(invitation.sent_at)
        .bind(invitation.opened_at)
        .bind(invitation.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Invitation>, AppError> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_opened(&self, token: &str) -> Result<(), AppError> {
        // First open only; the guard keeps the stamp idempotent.
        sqlx::query("UPDATE invitations SET opened_at = $1 WHERE token = $2 AND opened_at IS NULL")
            .bind(Utc::now())
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn update_link(&self, token: &str, whatsapp_link: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE invitations SET whatsapp_link = $1 WHERE token = $2")
            .bind(whatsapp_link)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
