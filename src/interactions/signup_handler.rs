//! Selection flow controller: the handlers behind the roster card's buttons
//! and the character/role select menus.
//!
//! Every entry point defers first, runs the step inside a `Result`, and
//! converts any failure into a user-visible message at the outer catch —
//! collaborator errors never escape past this module.

use crate::interactions::flow::{FlowStep, character_nudge, decide_signup_step};
use crate::interactions::ids::{ComponentId, SignupAction};
use crate::interactions::{InteractionContext, sync, util};
use crate::model::AppState;
use crate::services::ServiceError;
use crate::services::models::{
    Character, ConfirmOptions, EventInfo, LinkedUser, Signup, SignupOptions, SignupStatus,
};
use crate::ui::card::{character_select_row, role_select_row};
use serenity::builder::EditInteractionResponse;
use serenity::model::application::{ComponentInteraction, ComponentInteractionDataKind};
use serenity::prelude::Context;
use std::sync::Arc;
use thiserror::Error;

const MSG_COOLDOWN: &str = "Please wait a few seconds before trying again.";
const MSG_GENERIC_FAILURE: &str = "Something went wrong handling that action. Please try again.";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("event not found")]
    EventNotFound,
    #[error("linked account not found")]
    AccountNotLinked,
    #[error("character not found")]
    CharacterNotFound,
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Discord(#[from] serenity::Error),
}

impl FlowError {
    fn user_message(&self) -> &'static str {
        match self {
            FlowError::EventNotFound => "Event not found.",
            FlowError::AccountNotLinked => "Could not find your linked account.",
            FlowError::CharacterNotFound => "Could not find that character.",
            FlowError::Service(_) | FlowError::Discord(_) => MSG_GENERIC_FAILURE,
        }
    }
}

/// Entry point for the four roster-card buttons. Applies the cooldown, then
/// defers and runs the step.
pub async fn handle_button(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: Arc<AppState>,
    cid: ComponentId,
) {
    let now_ms = chrono::Utc::now().timestamp_millis();
    let accepted = app_state.cooldowns.lock().await.should_accept(
        component.user.id.get(),
        cid.event_id,
        now_ms,
    );
    if !accepted {
        tracing::debug!(target: "cooldown", user_id = component.user.id.get(), event_id = cid.event_id, "rejected inside window");
        util::ephemeral_reply(ctx, component, MSG_COOLDOWN).await;
        return;
    }

    util::defer_component(ctx, component).await;
    let ictx = InteractionContext::from_component(component, cid);
    let result = match cid.action {
        SignupAction::Signup => primary_signup(ctx, component, &app_state, &ictx).await,
        SignupAction::Tentative => {
            status_change(ctx, component, &app_state, &ictx, SignupStatus::Tentative).await
        }
        SignupAction::Decline => {
            status_change(ctx, component, &app_state, &ictx, SignupStatus::Declined).await
        }
        SignupAction::Cancel => cancel_signup(ctx, component, &app_state, &ictx).await,
        // Select actions never arrive through this entry point.
        SignupAction::CharacterSelect | SignupAction::RoleSelect => Ok(()),
    };
    if let Err(e) = result {
        report_failure(ctx, component, &ictx, "button", e).await;
    }
}

/// Entry point for the character/role select menus. The chosen value is
/// validated before the deferral so a malformed payload is ignored outright.
pub async fn handle_select(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: Arc<AppState>,
    cid: ComponentId,
) {
    let ComponentInteractionDataKind::StringSelect { values } = &component.data.kind else {
        return;
    };
    let Some(value) = values.first() else {
        return;
    };

    match cid.action {
        SignupAction::CharacterSelect => {
            // A non-integer character value means the payload is not ours.
            let Ok(character_id) = value.parse::<i64>() else {
                return;
            };
            util::defer_component(ctx, component).await;
            let ictx = InteractionContext::from_component(component, cid);
            if let Err(e) =
                character_chosen(ctx, component, &app_state, &ictx, character_id).await
            {
                report_failure(ctx, component, &ictx, "charselect", e).await;
            }
        }
        SignupAction::RoleSelect => {
            util::defer_component(ctx, component).await;
            let ictx = InteractionContext::from_component(component, cid);
            if let Err(e) = role_chosen(ctx, component, &app_state, &ictx, value).await {
                report_failure(ctx, component, &ictx, "roleselect", e).await;
            }
        }
        _ => {}
    }
}

/// Outer catch: log with event id and step, answer with the mapped message.
/// If even that edit fails with a non-benign error there is nothing left to
/// do but log it.
async fn report_failure(
    ctx: &Context,
    component: &ComponentInteraction,
    ictx: &InteractionContext,
    step: &str,
    err: FlowError,
) {
    tracing::error!(target: "signup.flow", event_id = ictx.event_id(), step, error = %err, "step failed");
    let builder = EditInteractionResponse::new().content(err.user_message());
    if let Err(e) = util::safe_edit(ctx, component, step, builder).await {
        tracing::error!(target: "signup.flow", event_id = ictx.event_id(), step, error = ?e, "failure reply failed");
    }
}

/// Primary signup click. A prior signup becomes a status refresh; otherwise
/// the decision table picks direct confirm or the character picker.
async fn primary_signup(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    ictx: &InteractionContext,
) -> Result<(), FlowError> {
    let event_id = ictx.event_id();
    let event = require_event(app_state, event_id).await?;

    if app_state
        .roster
        .find_by_user(event_id, ictx.user_id)
        .await?
        .is_some()
    {
        app_state
            .roster
            .update_status(event_id, ictx.user_id, SignupStatus::Confirmed)
            .await?;
        sync_after_write(ctx, app_state, ictx).await;
        return reply(
            ctx,
            component,
            "signup.refresh",
            format!("You're signed up for **{}**.", event.title),
        )
        .await;
    }

    let linked = app_state.identity.find_linked_user(ictx.user_id).await?;
    let characters = match (&linked, event.game_id) {
        (Some(user), Some(game_id)) => {
            app_state
                .identity
                .list_characters(user.user_id, game_id)
                .await?
        }
        _ => Vec::new(),
    };

    let step = decide_signup_step(
        &event,
        linked.as_ref(),
        &characters,
        app_state.public_base_url.is_some(),
    );
    match step {
        FlowStep::CharacterPick => {
            let continuation = ComponentId::new(SignupAction::CharacterSelect, event_id);
            let row = character_select_row(&continuation, &characters);
            let builder = EditInteractionResponse::new()
                .content(format!(
                    "Signing up for **{}** — pick a character:",
                    event.title
                ))
                .components(vec![row]);
            util::safe_edit(ctx, component, "signup.pick", builder).await?;
            Ok(())
        }
        FlowStep::DirectConfirm { character_id, nudge } => {
            commit_new_signup(
                app_state,
                ictx,
                linked.as_ref(),
                SignupStatus::Confirmed,
                character_id,
                None,
            )
            .await?;
            sync_after_write(ctx, app_state, ictx).await;
            let mut message = format!("You're signed up for **{}**!", event.title);
            if nudge {
                if let Some(base_url) = &app_state.public_base_url {
                    message.push('\n');
                    message.push_str(&character_nudge(base_url));
                }
            }
            reply(ctx, component, "signup.direct", message).await
        }
    }
}

/// The reduced machine for "tentative" and "decline": no pickers, one
/// status-only write, creating the signup in the target status when none
/// exists yet.
async fn status_change(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    ictx: &InteractionContext,
    status: SignupStatus,
) -> Result<(), FlowError> {
    let event_id = ictx.event_id();
    let event = require_event(app_state, event_id).await?;

    if app_state
        .roster
        .find_by_user(event_id, ictx.user_id)
        .await?
        .is_some()
    {
        app_state
            .roster
            .update_status(event_id, ictx.user_id, status)
            .await?;
    } else {
        let linked = app_state.identity.find_linked_user(ictx.user_id).await?;
        commit_new_signup(app_state, ictx, linked.as_ref(), status, None, None).await?;
    }
    sync_after_write(ctx, app_state, ictx).await;

    let message = match status {
        SignupStatus::Tentative => format!("Marked as tentative for **{}**.", event.title),
        SignupStatus::Declined => format!("You've declined **{}**.", event.title),
        SignupStatus::Confirmed => format!("You're signed up for **{}**.", event.title),
    };
    reply(ctx, component, "signup.status", message).await
}

async fn cancel_signup(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    ictx: &InteractionContext,
) -> Result<(), FlowError> {
    let event_id = ictx.event_id();
    let event = require_event(app_state, event_id).await?;

    if app_state
        .roster
        .find_by_user(event_id, ictx.user_id)
        .await?
        .is_none()
    {
        return reply(
            ctx,
            component,
            "signup.cancel.none",
            format!("You're not signed up for **{}**.", event.title),
        )
        .await;
    }
    app_state.roster.cancel(event_id, ictx.user_id).await?;
    sync_after_write(ctx, app_state, ictx).await;
    reply(
        ctx,
        component,
        "signup.cancel",
        format!("Your signup for **{}** was removed.", event.title),
    )
    .await
}

/// Character chosen from the picker. Role-typed events go on to the role
/// menu (read-only, no write yet); flat events commit here.
async fn character_chosen(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    ictx: &InteractionContext,
    character_id: i64,
) -> Result<(), FlowError> {
    let event_id = ictx.event_id();
    let event = require_event(app_state, event_id).await?;
    let linked = app_state
        .identity
        .find_linked_user(ictx.user_id)
        .await?
        .ok_or(FlowError::AccountNotLinked)?;
    let character = app_state
        .identity
        .get_character(linked.user_id, character_id)
        .await?
        .ok_or(FlowError::CharacterNotFound)?;

    if event.is_role_typed() {
        let roles = event.role_types.clone().unwrap_or_default();
        // The chosen character rides along in the next component's id.
        let continuation =
            ComponentId::with_character(SignupAction::RoleSelect, event_id, character.character_id);
        let row = role_select_row(&continuation, &roles);
        let builder = EditInteractionResponse::new()
            .content(format!("Signing up as **{}** — pick a role:", character.name))
            .components(vec![row]);
        util::safe_edit(ctx, component, "charselect.role", builder).await?;
        return Ok(());
    }

    commit_confirm(app_state, ictx, &linked, Some(&character), None).await?;
    sync_after_write(ctx, app_state, ictx).await;
    reply(
        ctx,
        component,
        "charselect.commit",
        format!(
            "You're signed up for **{}** as **{}**.",
            event.title, character.name
        ),
    )
    .await
}

/// Role chosen. A continuation without a character id is the anonymous-path
/// variant of the same step (role without character).
async fn role_chosen(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    ictx: &InteractionContext,
    role: &str,
) -> Result<(), FlowError> {
    let event_id = ictx.event_id();
    let event = require_event(app_state, event_id).await?;

    let linked = app_state.identity.find_linked_user(ictx.user_id).await?;
    let character = match ictx.component_id.character_id {
        Some(character_id) => {
            let user = linked.as_ref().ok_or(FlowError::AccountNotLinked)?;
            Some(
                app_state
                    .identity
                    .get_character(user.user_id, character_id)
                    .await?
                    .ok_or(FlowError::CharacterNotFound)?,
            )
        }
        None => None,
    };

    match (&linked, &character) {
        (Some(user), character) => {
            commit_confirm(app_state, ictx, user, character.as_ref(), Some(role)).await?;
        }
        (None, _) => {
            // Anonymous path: create first, then attach the role.
            let signup = app_state
                .roster
                .signup_anonymous(event_id, &ictx.anonymous_identity(), SignupStatus::Confirmed)
                .await?;
            app_state
                .roster
                .confirm(
                    event_id,
                    signup.signup_id,
                    ictx.user_id,
                    ConfirmOptions {
                        character_id: None,
                        role: Some(role.to_string()),
                    },
                )
                .await?;
        }
    }
    sync_after_write(ctx, app_state, ictx).await;

    let message = match &character {
        Some(c) => format!(
            "You're signed up for **{}** as **{}** ({}).",
            event.title, c.name, role
        ),
        None => format!("You're signed up for **{}** as **{}**.", event.title, role),
    };
    reply(ctx, component, "roleselect.commit", message).await
}

async fn require_event(app_state: &AppState, event_id: i64) -> Result<EventInfo, FlowError> {
    app_state
        .roster
        .get_event(event_id)
        .await?
        .ok_or(FlowError::EventNotFound)
}

/// First write for a user with no prior signup: linked accounts go through
/// `signup`, everyone else through the anonymous variant.
pub async fn commit_new_signup(
    app_state: &AppState,
    ictx: &InteractionContext,
    linked: Option<&LinkedUser>,
    status: SignupStatus,
    character_id: Option<i64>,
    role: Option<String>,
) -> Result<Signup, FlowError> {
    let signup = match linked {
        Some(user) => {
            app_state
                .roster
                .signup(
                    ictx.event_id(),
                    user.user_id,
                    ictx.user_id,
                    SignupOptions {
                        status,
                        character_id,
                        role,
                        display_name: user.username.clone(),
                    },
                )
                .await?
        }
        None => {
            app_state
                .roster
                .signup_anonymous(ictx.event_id(), &ictx.anonymous_identity(), status)
                .await?
        }
    };
    Ok(signup)
}

/// Terminal commit after the picker steps: finalize the existing signup, or
/// create one carrying the chosen character/role when none exists yet.
pub async fn commit_confirm(
    app_state: &AppState,
    ictx: &InteractionContext,
    linked: &LinkedUser,
    character: Option<&Character>,
    role: Option<&str>,
) -> Result<Signup, FlowError> {
    let event_id = ictx.event_id();
    let character_id = character.map(|c| c.character_id);
    let role = role.map(str::to_string);
    let signup = match app_state.roster.find_by_user(event_id, ictx.user_id).await? {
        Some(existing) => {
            app_state
                .roster
                .confirm(
                    event_id,
                    existing.signup_id,
                    ictx.user_id,
                    ConfirmOptions { character_id, role },
                )
                .await?
        }
        None => {
            app_state
                .roster
                .signup(
                    event_id,
                    linked.user_id,
                    ictx.user_id,
                    SignupOptions {
                        status: SignupStatus::Confirmed,
                        character_id,
                        role,
                        display_name: linked.username.clone(),
                    },
                )
                .await?
        }
    };
    Ok(signup)
}

/// One synchronization pass per committed write. Outside a guild (no shared
/// card to update) this is a no-op.
async fn sync_after_write(ctx: &Context, app_state: &AppState, ictx: &InteractionContext) {
    match ictx.guild_id {
        Some(guild_id) => sync::refresh_card(ctx, app_state, guild_id, ictx.event_id()).await,
        None => {
            tracing::debug!(target: "roster.sync", event_id = ictx.event_id(), "no guild, skipping card refresh");
        }
    }
}

async fn reply(
    ctx: &Context,
    component: &ComponentInteraction,
    tag: &str,
    message: String,
) -> Result<(), FlowError> {
    let builder = EditInteractionResponse::new().content(message);
    util::safe_edit(ctx, component, tag, builder).await?;
    Ok(())
}
