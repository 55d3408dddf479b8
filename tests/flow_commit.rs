//! Commit-path tests through the service-trait seam, with in-memory fakes
//! standing in for the roster and identity collaborators.

use async_trait::async_trait;
use chrono::Utc;
use rosterbot::interactions::InteractionContext;
use rosterbot::interactions::ids::{ComponentId, SignupAction};
use rosterbot::interactions::signup_handler::{commit_confirm, commit_new_signup};
use rosterbot::model::AppState;
use rosterbot::services::ServiceError;
use rosterbot::services::identity::IdentityService;
use rosterbot::services::models::{
    Announcement, AnonymousIdentity, Character, ConfirmOptions, EventInfo, LinkedUser,
    RosterSnapshot, Signup, SignupOptions, SignupStatus,
};
use rosterbot::services::roster::RosterService;
use serenity::model::id::{GuildId, UserId};
use std::sync::{Arc, Mutex};

/// Records every write call so tests can assert which path the flow took.
#[derive(Default)]
struct FakeRoster {
    existing: Mutex<Option<Signup>>,
    signup_calls: Mutex<Vec<SignupOptions>>,
    anonymous_calls: Mutex<Vec<(AnonymousIdentity, SignupStatus)>>,
    confirm_calls: Mutex<Vec<(i64, ConfirmOptions)>>,
}

#[async_trait]
impl RosterService for FakeRoster {
    async fn get_event(&self, _event_id: i64) -> Result<Option<EventInfo>, ServiceError> {
        Ok(None)
    }

    async fn find_by_user(
        &self,
        _event_id: i64,
        _user_id: UserId,
    ) -> Result<Option<Signup>, ServiceError> {
        Ok(self.existing.lock().unwrap().clone())
    }

    async fn signup(
        &self,
        event_id: i64,
        user_id: i64,
        external_user_id: UserId,
        opts: SignupOptions,
    ) -> Result<Signup, ServiceError> {
        self.signup_calls.lock().unwrap().push(opts.clone());
        Ok(Signup {
            signup_id: 100,
            event_id,
            user_id: Some(user_id),
            external_user_id: external_user_id.get() as i64,
            display_name: opts.display_name,
            status: opts.status,
            character_id: opts.character_id,
            role: opts.role,
            created_at: Utc::now(),
        })
    }

    async fn signup_anonymous(
        &self,
        event_id: i64,
        identity: &AnonymousIdentity,
        status: SignupStatus,
    ) -> Result<Signup, ServiceError> {
        self.anonymous_calls
            .lock()
            .unwrap()
            .push((identity.clone(), status));
        Ok(Signup {
            signup_id: 101,
            event_id,
            user_id: None,
            external_user_id: identity.external_user_id,
            display_name: identity.username.clone(),
            status,
            character_id: None,
            role: None,
            created_at: Utc::now(),
        })
    }

    async fn update_status(
        &self,
        _event_id: i64,
        _who: UserId,
        _status: SignupStatus,
    ) -> Result<Signup, ServiceError> {
        Err(ServiceError::NotFound("signup"))
    }

    async fn cancel(&self, _event_id: i64, _who: UserId) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn confirm(
        &self,
        event_id: i64,
        signup_id: i64,
        who: UserId,
        opts: ConfirmOptions,
    ) -> Result<Signup, ServiceError> {
        self.confirm_calls
            .lock()
            .unwrap()
            .push((signup_id, opts.clone()));
        Ok(Signup {
            signup_id,
            event_id,
            user_id: Some(5),
            external_user_id: who.get() as i64,
            display_name: "tester".into(),
            status: SignupStatus::Confirmed,
            character_id: opts.character_id,
            role: opts.role,
            created_at: Utc::now(),
        })
    }

    async fn get_roster(&self, _event_id: i64) -> Result<RosterSnapshot, ServiceError> {
        Ok(RosterSnapshot::from_signups(Vec::new()))
    }

    async fn find_announcement(
        &self,
        _event_id: i64,
        _guild_id: GuildId,
    ) -> Result<Option<Announcement>, ServiceError> {
        Ok(None)
    }
}

struct FakeIdentity;

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn find_linked_user(
        &self,
        _external_user_id: UserId,
    ) -> Result<Option<LinkedUser>, ServiceError> {
        Ok(None)
    }

    async fn list_characters(
        &self,
        _user_id: i64,
        _game_id: i64,
    ) -> Result<Vec<Character>, ServiceError> {
        Ok(Vec::new())
    }

    async fn get_character(
        &self,
        _user_id: i64,
        _character_id: i64,
    ) -> Result<Option<Character>, ServiceError> {
        Ok(None)
    }
}

fn state_with(roster: Arc<FakeRoster>) -> AppState {
    AppState::new(roster, Arc::new(FakeIdentity), None)
}

fn interaction(event_id: i64) -> InteractionContext {
    InteractionContext {
        user_id: UserId::new(77),
        username: "clicker".into(),
        avatar_url: Some("https://cdn.example/avatar.png".into()),
        guild_id: None,
        component_id: ComponentId::new(SignupAction::Signup, event_id),
    }
}

fn linked() -> LinkedUser {
    LinkedUser {
        user_id: 5,
        username: "tester".into(),
    }
}

fn existing_signup(id: i64, status: SignupStatus) -> Signup {
    Signup {
        signup_id: id,
        event_id: 1,
        user_id: Some(5),
        external_user_id: 77,
        display_name: "tester".into(),
        status,
        character_id: None,
        role: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn confirm_finalizes_existing_signup_instead_of_recreating() {
    let roster = Arc::new(FakeRoster::default());
    *roster.existing.lock().unwrap() = Some(existing_signup(55, SignupStatus::Tentative));
    let state = state_with(roster.clone());
    let ictx = interaction(1);
    let character = Character {
        character_id: 9,
        user_id: 5,
        game_id: 3,
        name: "Main".into(),
    };

    commit_confirm(&state, &ictx, &linked(), Some(&character), Some("tank"))
        .await
        .expect("commit should succeed");

    let confirms = roster.confirm_calls.lock().unwrap();
    assert_eq!(confirms.len(), 1);
    assert_eq!(confirms[0].0, 55);
    assert_eq!(confirms[0].1.character_id, Some(9));
    assert_eq!(confirms[0].1.role.as_deref(), Some("tank"));
    assert!(roster.signup_calls.lock().unwrap().is_empty());
    assert!(roster.anonymous_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn confirm_without_prior_signup_creates_one_carrying_the_choices() {
    let roster = Arc::new(FakeRoster::default());
    let state = state_with(roster.clone());
    let ictx = interaction(1);
    let character = Character {
        character_id: 9,
        user_id: 5,
        game_id: 3,
        name: "Main".into(),
    };

    let signup = commit_confirm(&state, &ictx, &linked(), Some(&character), Some("healer"))
        .await
        .expect("commit should succeed");

    assert!(roster.confirm_calls.lock().unwrap().is_empty());
    let signups = roster.signup_calls.lock().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0].status, SignupStatus::Confirmed);
    assert_eq!(signups[0].character_id, Some(9));
    assert_eq!(signups[0].role.as_deref(), Some("healer"));
    assert_eq!(signups[0].display_name, "tester");
    assert_eq!(signup.character_id, Some(9));
}

#[tokio::test]
async fn secondary_action_without_prior_signup_creates_in_target_status() {
    let roster = Arc::new(FakeRoster::default());
    let state = state_with(roster.clone());
    let ictx = interaction(1);

    commit_new_signup(
        &state,
        &ictx,
        Some(&linked()),
        SignupStatus::Tentative,
        None,
        None,
    )
    .await
    .expect("commit should succeed");

    let signups = roster.signup_calls.lock().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0].status, SignupStatus::Tentative);
    assert!(roster.anonymous_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unlinked_secondary_action_goes_through_the_anonymous_variant() {
    let roster = Arc::new(FakeRoster::default());
    let state = state_with(roster.clone());
    let ictx = interaction(1);

    commit_new_signup(&state, &ictx, None, SignupStatus::Declined, None, None)
        .await
        .expect("commit should succeed");

    assert!(roster.signup_calls.lock().unwrap().is_empty());
    let anonymous = roster.anonymous_calls.lock().unwrap();
    assert_eq!(anonymous.len(), 1);
    let (identity, status) = &anonymous[0];
    assert_eq!(*status, SignupStatus::Declined);
    // The interaction's identity travels intact, avatar included.
    assert_eq!(identity.external_user_id, 77);
    assert_eq!(identity.username, "clicker");
    assert_eq!(
        identity.avatar_url.as_deref(),
        Some("https://cdn.example/avatar.png")
    );
}
