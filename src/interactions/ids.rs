//! Composite custom_id codec for signup components.
//!
//! The wire format is fixed by the announcement messages already out there:
//! `<action>:<eventId>` or `<action>:<eventId>:<characterId>`, colon-delimited.
//! Parsing is deliberately strict — anything that does not match exactly is
//! `None`, which the dispatcher treats as "not one of our components".

pub const ACTION_SIGNUP: &str = "signup";
pub const ACTION_TENTATIVE: &str = "tentative";
pub const ACTION_DECLINE: &str = "decline";
pub const ACTION_CANCEL: &str = "cancel";
pub const ACTION_CHARACTER_SELECT: &str = "charselect";
pub const ACTION_ROLE_SELECT: &str = "roleselect";

const ID_DELIMITER: char = ':';

/// The action kind a component interaction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupAction {
    /// Primary signup button.
    Signup,
    /// Attendance-status buttons.
    Tentative,
    Decline,
    Cancel,
    /// Select-menu continuations of the multi-step flow.
    CharacterSelect,
    RoleSelect,
}

impl SignupAction {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            ACTION_SIGNUP => Some(Self::Signup),
            ACTION_TENTATIVE => Some(Self::Tentative),
            ACTION_DECLINE => Some(Self::Decline),
            ACTION_CANCEL => Some(Self::Cancel),
            ACTION_CHARACTER_SELECT => Some(Self::CharacterSelect),
            ACTION_ROLE_SELECT => Some(Self::RoleSelect),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Signup => ACTION_SIGNUP,
            Self::Tentative => ACTION_TENTATIVE,
            Self::Decline => ACTION_DECLINE,
            Self::Cancel => ACTION_CANCEL,
            Self::CharacterSelect => ACTION_CHARACTER_SELECT,
            Self::RoleSelect => ACTION_ROLE_SELECT,
        }
    }

    /// True for the actions that arrive as button clicks (and are subject to
    /// the cooldown); false for select-menu continuations.
    pub fn is_button(self) -> bool {
        matches!(
            self,
            Self::Signup | Self::Tentative | Self::Decline | Self::Cancel
        )
    }
}

/// A parsed component identifier. The optional character id is how the flow
/// threads a chosen character from one step to the next without any
/// server-side session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentId {
    pub action: SignupAction,
    pub event_id: i64,
    pub character_id: Option<i64>,
}

impl ComponentId {
    pub fn new(action: SignupAction, event_id: i64) -> Self {
        Self {
            action,
            event_id,
            character_id: None,
        }
    }

    pub fn with_character(action: SignupAction, event_id: i64, character_id: i64) -> Self {
        Self {
            action,
            event_id,
            character_id: Some(character_id),
        }
    }

    /// Parse a raw custom_id. Returns `None` for anything malformed: unknown
    /// action tag, non-integer event or character id, wrong part count.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(ID_DELIMITER);
        let action = SignupAction::from_tag(parts.next()?)?;
        let event_id = parts.next()?.parse::<i64>().ok()?;
        let character_id = match parts.next() {
            Some(c) => Some(c.parse::<i64>().ok()?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            action,
            event_id,
            character_id,
        })
    }

    pub fn encode(&self) -> String {
        match self.character_id {
            Some(c) => format!("{}:{}:{}", self.action.tag(), self.event_id, c),
            None => format!("{}:{}", self.action.tag(), self.event_id),
        }
    }
}
