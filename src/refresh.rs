//! Periodic refresh of the snapshot from the dump file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::RefreshError;
use crate::parser::DumpParser;
use crate::snapshot::SnapshotStore;

/// Interval between refresh cycles when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Re-reads and re-parses the dump on a fixed interval.
pub struct RefreshScheduler {
    dump_path: PathBuf,
    parser: DumpParser,
    store: Arc<SnapshotStore>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(dump_path: impl AsRef<Path>, parser: DumpParser, store: Arc<SnapshotStore>) -> Self {
        Self {
            dump_path: dump_path.as_ref().to_path_buf(),
            parser,
            store,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Set the pause between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one cycle. On error the store is left untouched.
    ///
    /// Returns the published generation.
    pub async fn refresh_once(&self) -> Result<u64, RefreshError> {
        let bytes = tokio::fs::read(&self.dump_path)
            .await
            .map_err(|e| RefreshError::Read {
                path: self.dump_path.clone(),
                source: e,
            })?;

        let text = String::from_utf8_lossy(&bytes);
        let parsed = self.parser.parse(&text)?;

        let access_points = parsed.access_points.len();
        let clients = parsed.clients.len();
        let generation = self.store.publish(parsed.access_points, parsed.clients);

        debug!(
            "Published generation {} ({} access points, {} clients)",
            generation, access_points, clients
        );
        Ok(generation)
    }

    /// Refresh until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Refreshing {:?} every {:?}",
            self.dump_path, self.interval
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            if let Err(e) = self.refresh_once().await {
                warn!("Refresh failed, keeping previous snapshot: {}", e);
            }

            // A dropped sender counts as shutdown
            let sender_gone = tokio::select! {
                _ = tokio::time::sleep(self.interval) => false,
                changed = shutdown.changed() => changed.is_err(),
            };
            if sender_gone {
                break;
            }
        }

        info!("Refresh loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CLIENT_SECTION_HEADER;
    use crate::registry::OrganizationRegistry;
    use tempfile::TempDir;

    fn dump_text(client_macs: &[&str]) -> String {
        let mut text = String::from(
            "\nBSSID, First time seen, Last time seen, channel, Speed, Privacy, Cipher, Authentication, Power, # beacons, # IV, LAN IP, ID-length, ESSID, Key\n",
        );
        text.push_str("00:14:6C:7E:40:80, 2024-01-01 09:58:00, 2024-01-01 10:05:00,  6,  54, WPA2, CCMP, PSK, -45, 120, 10, 0.  0.  0.  0, 7, HomeNet, \n\n");
        text.push_str(CLIENT_SECTION_HEADER);
        text.push('\n');
        for mac in client_macs {
            text.push_str(&format!(
                "{}, 2024-01-01 10:00:00, 2024-01-01 10:05:00, -40, 12, (not associated), \n",
                mac
            ));
        }
        text
    }

    fn scheduler(dir: &TempDir, store: Arc<SnapshotStore>) -> RefreshScheduler {
        let parser = DumpParser::new(Arc::new(OrganizationRegistry::default()));
        RefreshScheduler::new(dir.path().join("dump-01.csv"), parser, store)
            .with_interval(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_refresh_once_publishes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dump-01.csv"), dump_text(&["AA:BB:CC:DD:EE:01"])).unwrap();
        let store = Arc::new(SnapshotStore::new());

        let generation = scheduler(&dir, store.clone()).refresh_once().await.unwrap();

        assert_eq!(generation, 1);
        assert_eq!(store.current_access_points().len(), 1);
        assert_eq!(store.current_clients().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_keeps_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SnapshotStore::new());

        let result = scheduler(&dir, store.clone()).refresh_once().await;

        assert!(matches!(result, Err(RefreshError::Read { .. })));
        assert_eq!(store.generation(), 0);
        assert!(store.current_clients().is_empty());
    }

    #[tokio::test]
    async fn test_missing_marker_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump-01.csv");
        std::fs::write(&path, dump_text(&["AA:BB:CC:DD:EE:01", "AA:BB:CC:DD:EE:02"])).unwrap();
        let store = Arc::new(SnapshotStore::new());
        let scheduler = scheduler(&dir, store.clone());

        scheduler.refresh_once().await.unwrap();
        std::fs::write(&path, "BSSID, First time seen\n").unwrap();
        let result = scheduler.refresh_once().await;

        assert!(matches!(result, Err(RefreshError::Dump(_))));
        assert_eq!(store.generation(), 1);
        assert_eq!(store.current_clients().len(), 2);
    }

    #[tokio::test]
    async fn test_run_publishes_and_stops_on_shutdown() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dump-01.csv"), dump_text(&["AA:BB:CC:DD:EE:01"])).unwrap();
        let store = Arc::new(SnapshotStore::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(scheduler(&dir, store.clone()).run(shutdown_rx));

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while store.generation() < 2 {
            assert!(tokio::time::Instant::now() < deadline, "refresh loop did not publish");
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresh loop did not stop")
            .unwrap();
        assert_eq!(store.current_clients().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_when_sender_dropped() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SnapshotStore::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(scheduler(&dir, store).run(shutdown_rx));
        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresh loop did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_exits_immediately_if_already_cancelled() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dump-01.csv"), dump_text(&[])).unwrap();
        let store = Arc::new(SnapshotStore::new());
        let (_shutdown_tx, shutdown_rx) = watch::channel(true);

        scheduler(&dir, store.clone()).run(shutdown_rx).await;

        assert_eq!(store.generation(), 0);
    }
}
