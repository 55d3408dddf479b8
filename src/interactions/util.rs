//! Acknowledgment guard: single deferral plus reply wrappers that swallow the
//! platform's "this interaction was already answered" class of errors.
//!
//! Discord enforces one acknowledgment per interaction and a short token
//! lifetime. Under a double-click, two handlers can race to answer what the
//! user sees as one click; the loser's reply must become a no-op, not a crash.

use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::http::HttpError;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;

/// Discord JSON error code: the interaction token is unknown or expired.
pub const ERR_UNKNOWN_INTERACTION: isize = 10062;
/// Discord JSON error code: the interaction was already acknowledged.
pub const ERR_ALREADY_ACKNOWLEDGED: isize = 40060;
/// Discord JSON error code: the follow-up webhook token is no longer valid.
pub const ERR_INVALID_WEBHOOK_TOKEN: isize = 50027;

/// Is this error code the benign "a concurrent reply beat us to it /
/// the token lapsed" class?
pub fn is_benign_ack_code(code: isize) -> bool {
    matches!(
        code,
        ERR_UNKNOWN_INTERACTION | ERR_ALREADY_ACKNOWLEDGED | ERR_INVALID_WEBHOOK_TOKEN
    )
}

/// Extract the Discord JSON error code from a transport error, if present.
pub fn discord_json_code(err: &serenity::Error) -> Option<isize> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => Some(resp.error.code),
        _ => None,
    }
}

fn is_benign(err: &serenity::Error) -> bool {
    discord_json_code(err).is_some_and(is_benign_ack_code)
}

/// Acknowledge a component interaction with an ephemeral deferral. Called
/// exactly once at the top of every entry point, before any other async work,
/// so later failures always have an acknowledgment slot to edit.
pub async fn defer_component(ctx: &Context, c: &ComponentInteraction) {
    if let Err(e) = c.defer_ephemeral(&ctx.http).await {
        if is_benign(&e) {
            tracing::debug!(target: "ui.defer", cid = %c.data.custom_id, error = ?e, "defer lost the acknowledgment race");
        } else {
            tracing::error!(target: "ui.defer", cid = %c.data.custom_id, error = ?e, "defer failed");
        }
    }
}

/// Edit the original (deferred) interaction response. A benign acknowledgment
/// race is swallowed with a debug log; any other error propagates to the
/// entry point's outer catch.
pub async fn safe_edit(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    builder: EditInteractionResponse,
) -> serenity::Result<()> {
    match c.edit_response(&ctx.http, builder).await {
        Ok(_) => Ok(()),
        Err(e) if is_benign(&e) => {
            tracing::debug!(target: "ui.edit", cid = %c.data.custom_id, tag = %tag, error = ?e, "edit swallowed (already answered)");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Immediate ephemeral reply used before any deferral happened (the cooldown
/// rejection path). Benign races are swallowed like everywhere else.
pub async fn ephemeral_reply(ctx: &Context, c: &ComponentInteraction, content: &str) {
    let builder = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(e) = c.create_response(&ctx.http, builder).await {
        if is_benign(&e) {
            tracing::debug!(target: "ui.reply", cid = %c.data.custom_id, error = ?e, "reply swallowed (already answered)");
        } else {
            tracing::error!(target: "ui.reply", cid = %c.data.custom_id, error = ?e, "reply failed");
        }
    }
}
