use log::warn;
use std::time::{Duration, Instant};

use crate::config::anti_spam::{BAN_DURATION_SECONDS, MAX_REQUESTS_PER_SECOND};

/// Tracks anti-spam state for a single connected session.
pub struct AntiSpamState {
    // Last error code sent (for suppression)
    last_error_code: Option<String>,
    // Timestamp of last reset (for per-second counters)
    last_tick: Instant,
    // Number of requests received in the current second
    requests_this_tick: u32,
    // Ban state
    banned_until: Option<Instant>,
}

impl AntiSpamState {
    pub fn new() -> Self {
        Self {
            last_error_code: None,
            last_tick: Instant::now(),
            requests_this_tick: 0,
            banned_until: None,
        }
    }

    /// Call at the start of every incoming request (message).
    /// Returns true if the session is currently banned.
    pub fn record_request(&mut self, user: &str) -> bool {
        self.tick();
        self.requests_this_tick += 1;
        if self.requests_this_tick > MAX_REQUESTS_PER_SECOND {
            self.ban(user, "Too many requests per second");
            return true;
        }
        self.is_banned()
    }

    /// Call when sending an error. Returns true if the error should be sent (not suppressed).
    pub fn should_send_error(&mut self, error_code: &str, user: &str) -> bool {
        if let Some(last) = &self.last_error_code {
            if last == error_code {
                // Suppress duplicate error
                warn!(
                    "[AntiSpam] Suppressed duplicate error '{}' for user={}",
                    error_code, user
                );
                return false;
            }
        }
        self.last_error_code = Some(error_code.to_string());
        true
    }

    /// Call to reset error suppression (e.g., at the start of a new match).
    pub fn reset_error_suppression(&mut self) {
        self.last_error_code = None;
    }

    /// Returns true if the session is currently banned.
    pub fn is_banned(&self) -> bool {
        if let Some(until) = self.banned_until {
            Instant::now() < until
        } else {
            false
        }
    }

    /// Returns the remaining ban duration in seconds, or 0 if not banned.
    pub fn ban_remaining_secs(&self) -> u64 {
        if let Some(until) = self.banned_until {
            let now = Instant::now();
            if until > now {
                return (until - now).as_secs();
            }
        }
        0
    }

    /// Ban the session for BAN_DURATION_SECONDS.
    fn ban(&mut self, user: &str, reason: &str) {
        let until = Instant::now() + Duration::from_secs(BAN_DURATION_SECONDS);
        self.banned_until = Some(until);
        warn!(
            "[AntiSpam] Banned user={} until {:?} for reason: {}",
            user, until, reason
        );
    }

    /// Reset per-second counters if a new second has started.
    fn tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= Duration::from_secs(1) {
            self.last_tick = now;
            self.requests_this_tick = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flooding_within_one_second_gets_banned() {
        let mut state = AntiSpamState::new();
        let mut banned = false;
        for _ in 0..=MAX_REQUESTS_PER_SECOND {
            banned = state.record_request("flooder");
        }
        assert!(banned);
        assert!(state.is_banned());
        assert!(state.ban_remaining_secs() > 0);
    }

    #[test]
    fn duplicate_errors_are_suppressed_until_reset() {
        let mut state = AntiSpamState::new();
        assert!(state.should_send_error("ALREADY_SUBMITTED", "u"));
        assert!(!state.should_send_error("ALREADY_SUBMITTED", "u"));
        assert!(state.should_send_error("FOREIGN_MATCH", "u"));
        state.reset_error_suppression();
        assert!(state.should_send_error("FOREIGN_MATCH", "u"));
    }
}
