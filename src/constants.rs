// Central constants for rate limiting and display caps.

/// Minimum time between two accepted actions from the same user on the same event.
pub const SIGNUP_COOLDOWN_MS: i64 = 3_000;
/// Minimum time between two sweeps of the cooldown map for expired entries.
/// Deliberately much larger than the window so sweep cost amortizes.
pub const COOLDOWN_CLEANUP_INTERVAL_MS: i64 = 30_000;

/// Hard cap on participant names listed on the roster card; overflow collapses
/// into a single "+N more" line instead of silent truncation.
pub const ROSTER_DISPLAY_CAP: usize = 20;
/// Discord's limit on options in a single select menu. Characters beyond this
/// are simply not offered.
pub const MAX_SELECT_OPTIONS: usize = 25;
