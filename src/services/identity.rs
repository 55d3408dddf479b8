//! Identity collaborator: resolves Discord users to linked web-app accounts
//! and lists their characters for the game an event belongs to.

use super::ServiceError;
use super::models::{Character, LinkedUser};
use async_trait::async_trait;
use serenity::model::id::UserId;
use sqlx::PgPool;

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn find_linked_user(
        &self,
        external_user_id: UserId,
    ) -> Result<Option<LinkedUser>, ServiceError>;

    async fn list_characters(
        &self,
        user_id: i64,
        game_id: i64,
    ) -> Result<Vec<Character>, ServiceError>;

    /// Fetch one character, scoped to its owner so a forged id from a stale
    /// component can never resolve to someone else's character.
    async fn get_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> Result<Option<Character>, ServiceError>;
}

pub struct PgIdentityService {
    pool: PgPool,
}

impl PgIdentityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityService for PgIdentityService {
    async fn find_linked_user(
        &self,
        external_user_id: UserId,
    ) -> Result<Option<LinkedUser>, ServiceError> {
        let user = sqlx::query_as::<_, LinkedUser>(
            "SELECT user_id, username FROM users WHERE discord_id = $1",
        )
        .bind(external_user_id.get() as i64)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_characters(
        &self,
        user_id: i64,
        game_id: i64,
    ) -> Result<Vec<Character>, ServiceError> {
        let characters = sqlx::query_as::<_, Character>(
            "SELECT character_id, user_id, game_id, name FROM characters \
             WHERE user_id = $1 AND game_id = $2 ORDER BY name",
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(characters)
    }

    async fn get_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> Result<Option<Character>, ServiceError> {
        let character = sqlx::query_as::<_, Character>(
            "SELECT character_id, user_id, game_id, name FROM characters \
             WHERE user_id = $1 AND character_id = $2",
        )
        .bind(user_id)
        .bind(character_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(character)
    }
}
