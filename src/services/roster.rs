//! Roster collaborator: everything the signup flow needs to read and mutate
//! event signups. The trait is the seam the interaction handlers are written
//! against; `PgRosterService` is the production implementation over the
//! companion web app's Postgres schema.

use super::ServiceError;
use super::models::{
    Announcement, AnonymousIdentity, ConfirmOptions, EventInfo, RosterSnapshot, Signup,
    SignupOptions, SignupStatus,
};
use async_trait::async_trait;
use serenity::model::id::{GuildId, UserId};
use sqlx::PgPool;

#[async_trait]
pub trait RosterService: Send + Sync {
    async fn get_event(&self, event_id: i64) -> Result<Option<EventInfo>, ServiceError>;

    /// The acting user's signup for an event, if any (keyed by Discord id so
    /// anonymous signups are found too).
    async fn find_by_user(
        &self,
        event_id: i64,
        user_id: UserId,
    ) -> Result<Option<Signup>, ServiceError>;

    /// Create (or refresh, for a repeat click) a signup for a linked user.
    async fn signup(
        &self,
        event_id: i64,
        user_id: i64,
        external_user_id: UserId,
        opts: SignupOptions,
    ) -> Result<Signup, ServiceError>;

    /// Create a signup for a Discord user with no linked account.
    async fn signup_anonymous(
        &self,
        event_id: i64,
        identity: &AnonymousIdentity,
        status: SignupStatus,
    ) -> Result<Signup, ServiceError>;

    /// Attendance-status-only change for an existing signup.
    async fn update_status(
        &self,
        event_id: i64,
        who: UserId,
        status: SignupStatus,
    ) -> Result<Signup, ServiceError>;

    /// Remove a signup entirely.
    async fn cancel(&self, event_id: i64, who: UserId) -> Result<(), ServiceError>;

    /// Finalize an existing signup with the character/role chosen in the flow.
    async fn confirm(
        &self,
        event_id: i64,
        signup_id: i64,
        who: UserId,
        opts: ConfirmOptions,
    ) -> Result<Signup, ServiceError>;

    async fn get_roster(&self, event_id: i64) -> Result<RosterSnapshot, ServiceError>;

    /// Where the roster card for this event was posted in this guild, if it
    /// was announced at all.
    async fn find_announcement(
        &self,
        event_id: i64,
        guild_id: GuildId,
    ) -> Result<Option<Announcement>, ServiceError>;
}

pub struct PgRosterService {
    pool: PgPool,
}

impl PgRosterService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterService for PgRosterService {
    async fn get_event(&self, event_id: i64) -> Result<Option<EventInfo>, ServiceError> {
        let event = sqlx::query_as::<_, EventInfo>(
            "SELECT event_id, title, description, starts_at, game_id, role_types \
             FROM events WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn find_by_user(
        &self,
        event_id: i64,
        user_id: UserId,
    ) -> Result<Option<Signup>, ServiceError> {
        let signup = sqlx::query_as::<_, Signup>(
            "SELECT signup_id, event_id, user_id, external_user_id, display_name, status, \
                    character_id, role, created_at \
             FROM signups WHERE event_id = $1 AND external_user_id = $2",
        )
        .bind(event_id)
        .bind(user_id.get() as i64)
        .fetch_optional(&self.pool)
        .await?;
        Ok(signup)
    }

    async fn signup(
        &self,
        event_id: i64,
        user_id: i64,
        external_user_id: UserId,
        opts: SignupOptions,
    ) -> Result<Signup, ServiceError> {
        let signup = sqlx::query_as::<_, Signup>(
            "INSERT INTO signups (event_id, user_id, external_user_id, display_name, status, character_id, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (event_id, external_user_id) DO UPDATE \
               SET status = EXCLUDED.status, character_id = EXCLUDED.character_id, role = EXCLUDED.role \
             RETURNING signup_id, event_id, user_id, external_user_id, display_name, status, \
                       character_id, role, created_at",
        )
        .bind(event_id)
        .bind(user_id)
        .bind(external_user_id.get() as i64)
        .bind(&opts.display_name)
        .bind(opts.status)
        .bind(opts.character_id)
        .bind(&opts.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(signup)
    }

    async fn signup_anonymous(
        &self,
        event_id: i64,
        identity: &AnonymousIdentity,
        status: SignupStatus,
    ) -> Result<Signup, ServiceError> {
        let signup = sqlx::query_as::<_, Signup>(
            "INSERT INTO signups (event_id, user_id, external_user_id, display_name, avatar_url, status) \
             VALUES ($1, NULL, $2, $3, $4, $5) \
             ON CONFLICT (event_id, external_user_id) DO UPDATE SET status = EXCLUDED.status \
             RETURNING signup_id, event_id, user_id, external_user_id, display_name, status, \
                       character_id, role, created_at",
        )
        .bind(event_id)
        .bind(identity.external_user_id)
        .bind(&identity.username)
        .bind(&identity.avatar_url)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(signup)
    }

    async fn update_status(
        &self,
        event_id: i64,
        who: UserId,
        status: SignupStatus,
    ) -> Result<Signup, ServiceError> {
        let signup = sqlx::query_as::<_, Signup>(
            "UPDATE signups SET status = $3 \
             WHERE event_id = $1 AND external_user_id = $2 \
             RETURNING signup_id, event_id, user_id, external_user_id, display_name, status, \
                       character_id, role, created_at",
        )
        .bind(event_id)
        .bind(who.get() as i64)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        signup.ok_or(ServiceError::NotFound("signup"))
    }

    async fn cancel(&self, event_id: i64, who: UserId) -> Result<(), ServiceError> {
        let res = sqlx::query("DELETE FROM signups WHERE event_id = $1 AND external_user_id = $2")
            .bind(event_id)
            .bind(who.get() as i64)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(ServiceError::NotFound("signup"));
        }
        Ok(())
    }

    async fn confirm(
        &self,
        event_id: i64,
        signup_id: i64,
        who: UserId,
        opts: ConfirmOptions,
    ) -> Result<Signup, ServiceError> {
        let signup = sqlx::query_as::<_, Signup>(
            "UPDATE signups SET status = 'confirmed', character_id = $4, role = $5 \
             WHERE event_id = $1 AND signup_id = $2 AND external_user_id = $3 \
             RETURNING signup_id, event_id, user_id, external_user_id, display_name, status, \
                       character_id, role, created_at",
        )
        .bind(event_id)
        .bind(signup_id)
        .bind(who.get() as i64)
        .bind(opts.character_id)
        .bind(&opts.role)
        .fetch_optional(&self.pool)
        .await?;
        signup.ok_or(ServiceError::NotFound("signup"))
    }

    async fn get_roster(&self, event_id: i64) -> Result<RosterSnapshot, ServiceError> {
        let signups = sqlx::query_as::<_, Signup>(
            "SELECT signup_id, event_id, user_id, external_user_id, display_name, status, \
                    character_id, role, created_at \
             FROM signups WHERE event_id = $1 ORDER BY created_at, signup_id",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(RosterSnapshot::from_signups(signups))
    }

    async fn find_announcement(
        &self,
        event_id: i64,
        guild_id: GuildId,
    ) -> Result<Option<Announcement>, ServiceError> {
        let ann = sqlx::query_as::<_, Announcement>(
            "SELECT channel_id, message_id FROM event_announcements \
             WHERE event_id = $1 AND guild_id = $2",
        )
        .bind(event_id)
        .bind(guild_id.get() as i64)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ann)
    }
}
