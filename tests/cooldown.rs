use rosterbot::interactions::cooldown::CooldownTracker;

const WINDOW: i64 = 3_000;
const INTERVAL: i64 = 30_000;

fn tracker() -> CooldownTracker {
    CooldownTracker::new(WINDOW, INTERVAL)
}

#[test]
fn second_call_inside_window_rejected_and_timestamp_unchanged() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 1_000));
    assert!(!t.should_accept(1, 10, 2_000));
    assert_eq!(t.last_action(1, 10), Some(1_000));
}

#[test]
fn window_boundary_is_exclusive() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 0));
    assert!(!t.should_accept(1, 10, 2_999));
    // Exactly one window later the entry counts as expired even though no
    // sweep has run.
    assert!(t.should_accept(1, 10, 3_000));
    assert_eq!(t.last_action(1, 10), Some(3_000));
}

#[test]
fn pairs_are_independent() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 0));
    assert!(t.should_accept(2, 10, 0));
    assert!(t.should_accept(1, 11, 0));
    assert!(!t.should_accept(1, 10, 1));
}

#[test]
fn double_click_scenario() {
    // Two clicks 1s apart with a 3s window: second rejected; a third click
    // 4s after that succeeds normally.
    let mut t = tracker();
    assert!(t.should_accept(7, 99, 0));
    assert!(!t.should_accept(7, 99, 1_000));
    assert!(t.should_accept(7, 99, 5_000));
}

#[test]
fn cleanup_removes_only_expired_entries() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 0)); // first-ever call may sweep
    assert!(t.should_accept(2, 10, 5_000));
    assert!(t.should_accept(3, 10, 28_000));
    // No sweep has been due since t=0, so the long-expired entries linger.
    assert_eq!(t.tracked_entries(), 3);
    // This accepted call crosses the interval: users 1 and 2 are swept, user
    // 3 (age 2s, still in window) survives, user 4 is freshly recorded.
    assert!(t.should_accept(4, 10, 30_000));
    assert_eq!(t.tracked_entries(), 2);
    assert_eq!(t.last_action(3, 10), Some(28_000));
    assert_eq!(t.last_action(4, 10), Some(30_000));
    assert_eq!(t.last_action(1, 10), None);
    assert_eq!(t.last_action(2, 10), None);
}

#[test]
fn cleanup_runs_at_most_once_per_interval() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 0));
    // Expired long ago, but the next sweep is not due until t=30_000.
    assert!(t.should_accept(2, 10, 10_000));
    assert!(t.should_accept(3, 10, 20_000));
    assert_eq!(t.tracked_entries(), 3);
}

#[test]
fn cleanup_does_not_reset_cooldown_clocks() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 0));
    assert!(t.should_accept(2, 10, 29_000));
    // Sweep fires here (interval elapsed); user 2 is still in-window.
    assert!(t.should_accept(3, 10, 30_000));
    // The sweep must not have touched user 2's timestamp: a retry inside the
    // original window still rejects.
    assert!(!t.should_accept(2, 10, 31_000));
    assert_eq!(t.last_action(2, 10), Some(29_000));
}

#[test]
fn rejected_calls_never_trigger_growth() {
    let mut t = tracker();
    assert!(t.should_accept(1, 10, 0));
    for ms in 1..10 {
        assert!(!t.should_accept(1, 10, ms));
    }
    assert_eq!(t.tracked_entries(), 1);
}
