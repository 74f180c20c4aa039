//! Latest published snapshot, shared between the refresh loop and readers.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Local;

use crate::domain::{AccessPoint, Client, Snapshot};

/// Holds the current [`Snapshot`] behind an atomically swapped `Arc`.
///
/// The write lock is held only to swap the pointer; readers clone the `Arc`
/// and always see both lists from one cycle.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible snapshot. Returns the new generation number.
    pub fn publish(&self, access_points: Vec<AccessPoint>, clients: Vec<Client>) -> u64 {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let generation = guard.generation + 1;
        *guard = Arc::new(Snapshot {
            generation,
            refreshed_at: Some(Local::now()),
            access_points,
            clients,
        });
        generation
    }

    /// The most recently published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn current_access_points(&self) -> Vec<AccessPoint> {
        self.current().access_points.clone()
    }

    pub fn current_clients(&self) -> Vec<Client> {
        self.current().clients.clone()
    }

    pub fn generation(&self) -> u64 {
        self.current().generation
    }
}
