//! Gateway event handler: the dispatcher root. Filters incoming interactions
//! down to our components (anything whose custom_id doesn't parse is not ours
//! and is ignored without a reply) and routes to the signup flow.

use crate::interactions::ids::ComponentId;
use crate::interactions::signup_handler;
use crate::model::AppState;
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::Interaction;
use serenity::model::gateway::Ready;
use serenity::prelude::EventHandler;

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        let Some(cid) = ComponentId::parse(&component.data.custom_id) else {
            return;
        };
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            tracing::error!(target: "dispatch", "AppState missing from TypeMap");
            return;
        };
        if cid.action.is_button() {
            signup_handler::handle_button(&ctx, &component, app_state, cid).await;
        } else {
            signup_handler::handle_select(&ctx, &component, app_state, cid).await;
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(target: "gateway", user = %ready.user.name, "connected and ready");
    }
}
