//! The shared roster card and the selection-flow menus. Everything here is a
//! pure function of already-fetched state; the synchronizer decides when to
//! re-render and where to post.

use crate::constants::{MAX_SELECT_OPTIONS, ROSTER_DISPLAY_CAP};
use crate::interactions::ids::ComponentId;
use crate::services::models::{Character, EventInfo, RosterSnapshot, Signup, SignupStatus};
use crate::ui::buttons::signup_action_row;
use crate::ui::style::COLOR_EVENT_CARD;
use serenity::builder::{
    CreateActionRow, CreateEmbed, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
};

/// Display lines for the participant list, capped. A list of exactly `cap`
/// entries shows no suffix; anything beyond collapses into one "+N more" line.
pub fn participant_lines(signups: &[Signup], cap: usize) -> Vec<String> {
    let mut lines: Vec<String> = signups
        .iter()
        .take(cap)
        .map(|s| match &s.role {
            Some(role) => format!("{} {} — {}", s.status.emoji(), s.display_name, role),
            None => format!("{} {}", s.status.emoji(), s.display_name),
        })
        .collect();
    if signups.len() > cap {
        lines.push(format!("+{} more", signups.len() - cap));
    }
    lines
}

/// Active (non-declined) signups per role, in the event's declared role order.
pub fn role_counts(event: &EventInfo, signups: &[Signup]) -> Vec<(String, usize)> {
    let Some(roles) = &event.role_types else {
        return Vec::new();
    };
    roles
        .iter()
        .map(|role| {
            let n = signups
                .iter()
                .filter(|s| s.status != SignupStatus::Declined && s.role.as_deref() == Some(role))
                .count();
            (role.clone(), n)
        })
        .collect()
}

/// Render the event card embed plus its signup action row. Pure: recomputed
/// fresh from the latest roster snapshot on every committed write.
pub fn render_event_card(
    event: &EventInfo,
    roster: &RosterSnapshot,
) -> (CreateEmbed, CreateActionRow) {
    let mut embed = CreateEmbed::new()
        .title(event.title.clone())
        .color(COLOR_EVENT_CARD)
        .field("Starts", format!("<t:{}:F>", event.starts_at.timestamp()), true)
        .field("Signed up", roster.count.to_string(), true);
    if let Some(desc) = &event.description {
        embed = embed.description(desc.clone());
    }
    for (role, n) in role_counts(event, &roster.signups) {
        embed = embed.field(role, n.to_string(), true);
    }
    let lines = participant_lines(&roster.signups, ROSTER_DISPLAY_CAP);
    if !lines.is_empty() {
        embed = embed.field("Roster", lines.join("\n"), false);
    }
    (embed, signup_action_row(event.event_id))
}

/// Select menu offering the user's characters for this event. Bounded to the
/// platform's option limit; overflow characters are not offered.
pub fn character_select_row(continuation: &ComponentId, characters: &[Character]) -> CreateActionRow {
    let options: Vec<CreateSelectMenuOption> = characters
        .iter()
        .take(MAX_SELECT_OPTIONS)
        .map(|c| CreateSelectMenuOption::new(c.name.clone(), c.character_id.to_string()))
        .collect();
    let menu = CreateSelectMenu::new(
        continuation.encode(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder("Pick a character");
    CreateActionRow::SelectMenu(menu)
}

/// Select menu offering the event's role categories. The continuation id may
/// carry a previously-chosen character id.
pub fn role_select_row(continuation: &ComponentId, roles: &[String]) -> CreateActionRow {
    let options: Vec<CreateSelectMenuOption> = roles
        .iter()
        .take(MAX_SELECT_OPTIONS)
        .map(|r| CreateSelectMenuOption::new(r.clone(), r.clone()))
        .collect();
    let menu = CreateSelectMenu::new(
        continuation.encode(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder("Pick a role");
    CreateActionRow::SelectMenu(menu)
}
