use crate::domain::models::invitation::Invitation;
use crate::domain::ports::InvitationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteInvitationRepo {
    pool: SqlitePool,
}

impl SqliteInvitationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for SqliteInvitationRepo {
    async fn create(&self, invitation: &Invitation) -> Result<Invitation, AppError> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO invitations (id, event_id, guest_id, token, channel, whatsapp_link, sent_at, opened_at, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
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
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_opened(&self, token: &str) -> Result<(), AppError> {
        // First open only; the guard keeps the stamp idempotent.
        sqlx::query("UPDATE invitations SET opened_at = ? WHERE token = ? AND opened_at IS NULL")
            .bind(Utc::now())
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn update_link(&self, token: &str, whatsapp_link: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE invitations SET whatsapp_link = ? WHERE token = ?")
            .bind(whatsapp_link)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
