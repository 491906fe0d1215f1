//! File-backed device connector.
//!
//! Each device is represented by a JSON snapshot of its hardware health at
//! `<dir>/<ip_address>.json`, in the shape of
//! [`HardwareHealthReading`]. Useful wherever a live device protocol is
//! not available: lab setups, replaying captured readings, tests.

use std::path::PathBuf;

use async_trait::async_trait;
use hwcheck_core::device::DeviceData;
use hwcheck_core::error::RequestError;
use hwcheck_core::hardware::HardwareHealthReading;
use tokio_util::sync::CancellationToken;

use crate::connection::{Connection, Connector, DeviceConnection};

pub struct SnapshotConnector {
    dir: PathBuf,
}

impl SnapshotConnector {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_path(&self, device: &DeviceData) -> PathBuf {
        self.dir.join(format!("{}.json", device.ip_address))
    }
}

#[async_trait]
impl Connector for SnapshotConnector {
    type Connection = SnapshotConnection;

    async fn connect(
        &self,
        device: &DeviceData,
        _cancel: &CancellationToken,
    ) -> Result<SnapshotConnection, RequestError> {
        let path = self.snapshot_path(device);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {
                tracing::debug!(path = %path.display(), "Opened device snapshot");
                Ok(SnapshotConnection { path, open: true })
            }
            Ok(_) => Err(RequestError::Connection(format!(
                "{} is not a file",
                path.display()
            ))),
            Err(e) => Err(RequestError::Connection(format!(
                "no snapshot for device {} at {}: {e}",
                device.ip_address,
                path.display()
            ))),
        }
    }
}

/// An open snapshot "connection". Reading re-parses the file each time.
#[derive(Debug)]
pub struct SnapshotConnection {
    path: PathBuf,
    open: bool,
}

impl SnapshotConnection {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Connection for SnapshotConnection {
    fn close_connections(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!(path = %self.path.display(), "Closed device snapshot");
        }
    }
}

#[async_trait]
impl DeviceConnection for SnapshotConnection {
    async fn read_hardware_health(&mut self) -> Result<HardwareHealthReading, RequestError> {
        if !self.open {
            return Err(RequestError::Read("connection is closed".to_string()));
        }
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RequestError::Read(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| RequestError::Read(format!("malformed snapshot {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use assert_matches::assert_matches;
    use hwcheck_core::hardware::Fan;

    use super::*;

    fn write_snapshot(dir: &Path, address: &str, body: &str) {
        std::fs::write(dir.join(format!("{address}.json")), body).unwrap();
    }

    #[tokio::test]
    async fn reads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "10.0.0.1",
            r#"{"fans": [{"description": "Fan 1", "state": "normal"}]}"#,
        );

        let connector = SnapshotConnector::new(dir.path());
        let mut conn = connector
            .connect(&DeviceData::new("10.0.0.1"), &CancellationToken::new())
            .await
            .unwrap();
        let reading = conn.read_hardware_health().await.unwrap();
        assert_eq!(reading.fans, vec![Fan::new(Some("Fan 1"), Some("normal"))]);
    }

    #[tokio::test]
    async fn missing_snapshot_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let connector = SnapshotConnector::new(dir.path());
        let result = connector
            .connect(&DeviceData::new("10.0.0.2"), &CancellationToken::new())
            .await;
        assert_matches!(result, Err(RequestError::Connection(msg)) if msg.contains("10.0.0.2"));
    }

    #[tokio::test]
    async fn malformed_snapshot_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "10.0.0.3", "{ not json");

        let connector = SnapshotConnector::new(dir.path());
        let mut conn = connector
            .connect(&DeviceData::new("10.0.0.3"), &CancellationToken::new())
            .await
            .unwrap();
        assert_matches!(conn.read_hardware_health().await, Err(RequestError::Read(_)));
    }

    #[tokio::test]
    async fn close_is_idempotent_and_blocks_reads() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "10.0.0.4", "{}");

        let connector = SnapshotConnector::new(dir.path());
        let mut conn = connector
            .connect(&DeviceData::new("10.0.0.4"), &CancellationToken::new())
            .await
            .unwrap();
        conn.close_connections();
        conn.close_connections();
        assert!(!conn.is_open());
        assert_matches!(conn.read_hardware_health().await, Err(RequestError::Read(_)));
    }
}
