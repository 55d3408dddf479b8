//! Pure decision logic for the primary signup click: given the event's
//! configuration and the user's linked-account/character state, pick the next
//! step of the selection flow. Kept free of I/O so the whole table is unit
//! testable.

use crate::services::models::{Character, EventInfo, LinkedUser};

/// The next step after a primary signup click with no prior signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// Commit immediately. `character_id` is pre-filled when exactly one
    /// character qualifies; `nudge` asks the reply to mention character
    /// linking (cosmetic only, never blocks the write).
    DirectConfirm {
        character_id: Option<i64>,
        nudge: bool,
    },
    /// Offer the character picker.
    CharacterPick,
}

/// Decision table:
/// - event has no qualifying game, or account unlinked → direct confirm
///   (anonymous write when unlinked);
/// - linked with zero characters → direct confirm, nudging only when a public
///   base URL is configured;
/// - at least one character and (role-typed event or more than one
///   character) → character picker;
/// - exactly one character on a flat event → direct confirm with it.
pub fn decide_signup_step(
    event: &EventInfo,
    linked: Option<&LinkedUser>,
    characters: &[Character],
    has_base_url: bool,
) -> FlowStep {
    if event.game_id.is_none() || linked.is_none() {
        return FlowStep::DirectConfirm {
            character_id: None,
            nudge: false,
        };
    }
    if characters.is_empty() {
        return FlowStep::DirectConfirm {
            character_id: None,
            nudge: has_base_url,
        };
    }
    if event.is_role_typed() || characters.len() > 1 {
        return FlowStep::CharacterPick;
    }
    FlowStep::DirectConfirm {
        character_id: Some(characters[0].character_id),
        nudge: false,
    }
}

/// The informational line appended to a successful signup reply when the user
/// has no characters yet and the web app is reachable.
pub fn character_nudge(base_url: &str) -> String {
    format!(
        "Tip: add a character at {}/characters to pick who you bring next time.",
        base_url.trim_end_matches('/')
    )
}
