//! Shared application state, stored in serenity's global TypeMap.

use crate::constants::{COOLDOWN_CLEANUP_INTERVAL_MS, SIGNUP_COOLDOWN_MS};
use crate::interactions::cooldown::CooldownTracker;
use crate::services::identity::IdentityService;
use crate::services::roster::RosterService;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The central, shared state of the application. An `Arc<AppState>` is stored
/// in the global context for access from the event handler.
pub struct AppState {
    /// Roster collaborator (signups, events, announcements).
    pub roster: Arc<dyn RosterService>,
    /// Identity collaborator (linked accounts, characters).
    pub identity: Arc<dyn IdentityService>,
    /// The per-user/per-event cooldown map. Locked only for the synchronous
    /// check-and-set; never held across an await.
    pub cooldowns: Mutex<CooldownTracker>,
    /// Base URL of the companion web app, when configured. Only used for the
    /// cosmetic "add a character" nudge.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        roster: Arc<dyn RosterService>,
        identity: Arc<dyn IdentityService>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            roster,
            identity,
            cooldowns: Mutex::new(CooldownTracker::new(
                SIGNUP_COOLDOWN_MS,
                COOLDOWN_CLEANUP_INTERVAL_MS,
            )),
            public_base_url,
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
