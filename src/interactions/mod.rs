//! Component interaction handling: the dispatcher in `handler.rs` parses the
//! composite identifier and delegates here. `signup_handler` owns the
//! selection flow; the leaf pieces (ids, cooldown, acknowledgment guard,
//! synchronizer) each live in their own module.

pub mod cooldown;
pub mod flow;
pub mod ids;
pub mod signup_handler;
pub mod sync;
pub mod util;

use crate::services::models::AnonymousIdentity;
use ids::ComponentId;
use serenity::model::application::ComponentInteraction;
use serenity::model::id::{GuildId, UserId};

/// Everything one interaction carries that the flow needs. Transient: built
/// per event, never stored.
#[derive(Debug, Clone)]
pub struct InteractionContext {
    pub user_id: UserId,
    pub username: String,
    pub avatar_url: Option<String>,
    pub guild_id: Option<GuildId>,
    pub component_id: ComponentId,
}

impl InteractionContext {
    pub fn from_component(c: &ComponentInteraction, component_id: ComponentId) -> Self {
        Self {
            user_id: c.user.id,
            username: c.user.name.clone(),
            avatar_url: c.user.avatar_url(),
            guild_id: c.guild_id,
            component_id,
        }
    }

    pub fn event_id(&self) -> i64 {
        self.component_id.event_id
    }

    /// Identity payload for signups from users with no linked account.
    pub fn anonymous_identity(&self) -> AnonymousIdentity {
        AnonymousIdentity {
            external_user_id: self.user_id.get() as i64,
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}
