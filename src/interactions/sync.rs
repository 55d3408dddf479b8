//! Roster synchronizer: after a committed write, recompute the roster view
//! and re-render the shared card exactly once.
//!
//! Failures here are never surfaced to the user whose action triggered the
//! refresh — their write already succeeded; a missing or uneditable card only
//! means the announcement is gone or permissions changed.

use crate::AppState;
use crate::ui::card::render_event_card;
use serenity::builder::EditMessage;
use serenity::model::id::{ChannelId, GuildId, MessageId};
use serenity::prelude::Context;

/// Re-render the posted roster card for an event. No posted card means the
/// event was never announced in this guild; that is not an error.
pub async fn refresh_card(ctx: &Context, app_state: &AppState, guild_id: GuildId, event_id: i64) {
    let event = match app_state.roster.get_event(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            tracing::debug!(target: "roster.sync", event_id, "event vanished before refresh");
            return;
        }
        Err(e) => {
            tracing::warn!(target: "roster.sync", event_id, error = %e, "event lookup failed");
            return;
        }
    };
    let announcement = match app_state.roster.find_announcement(event_id, guild_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            tracing::debug!(target: "roster.sync", event_id, "event not announced here");
            return;
        }
        Err(e) => {
            tracing::warn!(target: "roster.sync", event_id, error = %e, "announcement lookup failed");
            return;
        }
    };
    let roster = match app_state.roster.get_roster(event_id).await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(target: "roster.sync", event_id, error = %e, "roster fetch failed");
            return;
        }
    };

    let (embed, action_row) = render_event_card(&event, &roster);
    let channel = ChannelId::new(announcement.channel_id as u64);
    let message = MessageId::new(announcement.message_id as u64);
    let builder = EditMessage::new().embed(embed).components(vec![action_row]);
    if let Err(e) = channel.edit_message(&ctx.http, message, builder).await {
        // Card deleted by a moderator, permissions revoked, etc. The next
        // write's pass will try again.
        tracing::warn!(target: "roster.sync", event_id, error = ?e, "card edit failed");
    }
}
