//! Recency filtering for client lists.

use chrono::{DateTime, Duration, Local};

use crate::domain::Client;

/// Window used when the caller gives none, or gives garbage.
pub const DEFAULT_WINDOW_MINUTES: u32 = 60;

/// Keeps clients whose last-seen time is inside a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyFilter {
    window_minutes: u32,
}

impl RecencyFilter {
    pub fn new(window_minutes: u32) -> Self {
        Self { window_minutes }
    }

    /// Build from an untrusted query value. Missing, non-numeric or negative
    /// input falls back to [`DEFAULT_WINDOW_MINUTES`].
    pub fn from_param(raw: Option<&str>) -> Self {
        let window_minutes = raw
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_WINDOW_MINUTES);
        Self::new(window_minutes)
    }

    pub fn window_minutes(&self) -> u32 {
        self.window_minutes
    }

    /// Clients seen strictly after `now - window`.
    pub fn apply_at(&self, clients: &[Client], now: DateTime<Local>) -> Vec<Client> {
        let cutoff = now - Duration::minutes(i64::from(self.window_minutes));
        clients
            .iter()
            .filter(|client| client.last_seen > cutoff)
            .cloned()
            .collect()
    }

    pub fn apply(&self, clients: &[Client]) -> Vec<Client> {
        self.apply_at(clients, Local::now())
    }
}

impl Default for RecencyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MINUTES)
    }
}
