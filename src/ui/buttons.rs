//! Central button construction helpers ensuring consistent padding and style.
use crate::interactions::ids::{ComponentId, SignupAction};
use crate::ui::style::pad_std;
use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

pub struct Btn;
impl Btn {
    pub fn success(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_std(label))
            .style(ButtonStyle::Success)
    }
    pub fn secondary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_std(label))
            .style(ButtonStyle::Secondary)
    }
    pub fn danger(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_std(label))
            .style(ButtonStyle::Danger)
    }
}

/// The action row attached to every roster card: the four attendance actions,
/// each carrying the event id in its composite identifier.
pub fn signup_action_row(event_id: i64) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        Btn::success(
            &ComponentId::new(SignupAction::Signup, event_id).encode(),
            "Sign Up",
        ),
        Btn::secondary(
            &ComponentId::new(SignupAction::Tentative, event_id).encode(),
            "Tentative",
        ),
        Btn::danger(
            &ComponentId::new(SignupAction::Decline, event_id).encode(),
            "Decline",
        ),
        Btn::secondary(
            &ComponentId::new(SignupAction::Cancel, event_id).encode(),
            "Cancel",
        ),
    ])
}
