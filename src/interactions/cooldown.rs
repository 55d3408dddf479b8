//! Per-user/per-event cooldown with lazy cleanup.
//!
//! The map lives only in process memory; a restart clears it, which is fine —
//! its whole job is to absorb double-clicks and button mashing, not to be a
//! durable rate limiter. The caller passes the clock in, which keeps the
//! expiry and sweep logic testable without sleeping.

use std::collections::HashMap;

pub struct CooldownTracker {
    window_ms: i64,
    cleanup_interval_ms: i64,
    entries: HashMap<(u64, i64), i64>,
    /// `None` means no sweep has ever run, so the first accepted call may sweep.
    last_cleanup_ms: Option<i64>,
}

impl CooldownTracker {
    pub fn new(window_ms: i64, cleanup_interval_ms: i64) -> Self {
        Self {
            window_ms,
            cleanup_interval_ms,
            entries: HashMap::new(),
            last_cleanup_ms: None,
        }
    }

    /// Combined check-and-set: returns `false` (and leaves the recorded
    /// timestamp untouched) when the last accepted action for this
    /// user/event pair is still inside the window; otherwise records `now_ms`
    /// and returns `true`. Not idempotent — call once per action.
    pub fn should_accept(&mut self, user_id: u64, event_id: i64, now_ms: i64) -> bool {
        let key = (user_id, event_id);
        if let Some(&last) = self.entries.get(&key) {
            if now_ms - last < self.window_ms {
                return false;
            }
        }
        self.entries.insert(key, now_ms);
        self.maybe_cleanup(now_ms);
        true
    }

    /// Sweep expired entries, at most once per cleanup interval. Only deletes;
    /// never touches the timestamp of an entry still inside its window.
    fn maybe_cleanup(&mut self, now_ms: i64) {
        let due = match self.last_cleanup_ms {
            None => true,
            Some(last) => now_ms - last >= self.cleanup_interval_ms,
        };
        if !due {
            return;
        }
        let window = self.window_ms;
        self.entries.retain(|_, &mut last| now_ms - last < window);
        self.last_cleanup_ms = Some(now_ms);
    }

    /// Recorded timestamp for a pair, if still tracked. Test probe.
    pub fn last_action(&self, user_id: u64, event_id: i64) -> Option<i64> {
        self.entries.get(&(user_id, event_id)).copied()
    }

    /// Number of tracked pairs. Test probe.
    pub fn tracked_entries(&self) -> usize {
        self.entries.len()
    }
}
