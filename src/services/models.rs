//! Data structures shared between the interaction handlers and the service
//! layer. Rows map 1:1 to the companion web app's tables.

use sqlx::Type;
use sqlx::types::chrono::{DateTime, Utc};

/// Attendance status of a signup. "Declined" still keeps the row around so the
/// card can show who opted out; it is excluded from the active count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type)]
#[sqlx(type_name = "signup_status", rename_all = "lowercase")]
pub enum SignupStatus {
    Confirmed,
    Tentative,
    Declined,
}

impl SignupStatus {
    pub fn emoji(self) -> &'static str {
        match self {
            SignupStatus::Confirmed => "✅",
            SignupStatus::Tentative => "❔",
            SignupStatus::Declined => "❌",
        }
    }
}

/// An event as the signup flow sees it. `role_types` is optional on purpose:
/// events configured without role categories (or with a partial config) are
/// treated as flat-headcount events.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct EventInfo {
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub game_id: Option<i64>,
    pub role_types: Option<Vec<String>>,
}

impl EventInfo {
    /// True when signup capacity is divided into role categories.
    pub fn is_role_typed(&self) -> bool {
        self.role_types.as_ref().is_some_and(|r| !r.is_empty())
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Signup {
    pub signup_id: i64,
    pub event_id: i64,
    /// Linked web-app user, when the Discord account is linked.
    pub user_id: Option<i64>,
    /// Discord user id of whoever clicked.
    pub external_user_id: i64,
    pub display_name: String,
    pub status: SignupStatus,
    pub character_id: Option<i64>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Character {
    pub character_id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub name: String,
}

/// A web-app account linked to a Discord user.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct LinkedUser {
    pub user_id: i64,
    pub username: String,
}

/// Enough of a Discord user to create a signup without a linked account.
#[derive(Debug, Clone)]
pub struct AnonymousIdentity {
    pub external_user_id: i64,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Location of the posted roster card for an event within one guild.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Announcement {
    pub channel_id: i64,
    pub message_id: i64,
}

/// Current roster for an event. `count` is the active (non-declined) total.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub signups: Vec<Signup>,
    pub count: i64,
}

impl RosterSnapshot {
    pub fn from_signups(signups: Vec<Signup>) -> Self {
        let count = signups
            .iter()
            .filter(|s| s.status != SignupStatus::Declined)
            .count() as i64;
        Self { signups, count }
    }
}

/// Fields for creating or refreshing a signup in one call.
#[derive(Debug, Clone)]
pub struct SignupOptions {
    pub status: SignupStatus,
    pub character_id: Option<i64>,
    pub role: Option<String>,
    pub display_name: String,
}

/// Fields for finalizing an existing signup after the picker steps.
#[derive(Debug, Clone, Default)]
pub struct ConfirmOptions {
    pub character_id: Option<i64>,
    pub role: Option<String>,
}
