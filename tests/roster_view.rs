use chrono::Utc;
use rosterbot::constants::ROSTER_DISPLAY_CAP;
use rosterbot::services::models::{EventInfo, RosterSnapshot, Signup, SignupStatus};
use rosterbot::ui::card::{participant_lines, role_counts};

fn signup(id: i64, name: &str, status: SignupStatus, role: Option<&str>) -> Signup {
    Signup {
        signup_id: id,
        event_id: 1,
        user_id: Some(id),
        external_user_id: id,
        display_name: name.to_string(),
        status,
        character_id: None,
        role: role.map(String::from),
        created_at: Utc::now(),
    }
}

fn many(n: usize) -> Vec<Signup> {
    (0..n)
        .map(|i| {
            signup(
                i as i64,
                &format!("member-{i}"),
                SignupStatus::Confirmed,
                None,
            )
        })
        .collect()
}

#[test]
fn list_at_cap_has_no_suffix() {
    let lines = participant_lines(&many(ROSTER_DISPLAY_CAP), ROSTER_DISPLAY_CAP);
    assert_eq!(lines.len(), ROSTER_DISPLAY_CAP);
    assert!(!lines.last().unwrap().contains("more"));
}

#[test]
fn one_past_cap_collapses_into_plus_one_more() {
    let lines = participant_lines(&many(ROSTER_DISPLAY_CAP + 1), ROSTER_DISPLAY_CAP);
    assert_eq!(lines.len(), ROSTER_DISPLAY_CAP + 1);
    assert_eq!(lines.last().unwrap(), "+1 more");
    // The (cap+1)-th member is not listed explicitly.
    let overflow_name = format!("member-{ROSTER_DISPLAY_CAP}");
    assert!(lines.iter().all(|l| !l.contains(&overflow_name)));
}

#[test]
fn large_overflow_counts_correctly() {
    let lines = participant_lines(&many(ROSTER_DISPLAY_CAP + 12), ROSTER_DISPLAY_CAP);
    assert_eq!(lines.last().unwrap(), "+12 more");
}

#[test]
fn lines_carry_status_and_role() {
    let signups = vec![
        signup(1, "alice", SignupStatus::Confirmed, Some("tank")),
        signup(2, "bob", SignupStatus::Tentative, None),
    ];
    let lines = participant_lines(&signups, ROSTER_DISPLAY_CAP);
    assert!(lines[0].contains("alice"));
    assert!(lines[0].contains("tank"));
    assert!(lines[1].contains("bob"));
}

#[test]
fn active_count_excludes_declined() {
    let snapshot = RosterSnapshot::from_signups(vec![
        signup(1, "alice", SignupStatus::Confirmed, None),
        signup(2, "bob", SignupStatus::Declined, None),
        signup(3, "carol", SignupStatus::Tentative, None),
    ]);
    assert_eq!(snapshot.count, 2);
    assert_eq!(snapshot.signups.len(), 3);
}

#[test]
fn role_counts_follow_declared_order_and_skip_declined() {
    let event = EventInfo {
        event_id: 1,
        title: "Weekly Raid".into(),
        description: None,
        starts_at: Utc::now(),
        game_id: Some(3),
        role_types: Some(vec!["tank".into(), "healer".into(), "damage".into()]),
    };
    let signups = vec![
        signup(1, "alice", SignupStatus::Confirmed, Some("damage")),
        signup(2, "bob", SignupStatus::Confirmed, Some("tank")),
        signup(3, "carol", SignupStatus::Declined, Some("tank")),
        signup(4, "dave", SignupStatus::Tentative, Some("damage")),
    ];
    let counts = role_counts(&event, &signups);
    assert_eq!(
        counts,
        vec![
            ("tank".to_string(), 1),
            ("healer".to_string(), 0),
            ("damage".to_string(), 2),
        ]
    );
}

#[test]
fn flat_event_has_no_role_counts() {
    let event = EventInfo {
        event_id: 1,
        title: "Game Night".into(),
        description: None,
        starts_at: Utc::now(),
        game_id: None,
        role_types: None,
    };
    assert!(role_counts(&event, &many(3)).is_empty());
}
