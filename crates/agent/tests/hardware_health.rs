//! End-to-end tests for the hardware health check: snapshot file ->
//! executor -> status pipeline -> response.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use hwcheck_agent::connection::{Connection, Connector, DeviceConnection};
use hwcheck_agent::executor::execute;
use hwcheck_agent::hardware_health::{CheckHardwareHealthRequest, READ_FAILED};
use hwcheck_agent::request::BaseRequest;
use hwcheck_agent::snapshot::SnapshotConnector;
use hwcheck_core::device::DeviceData;
use hwcheck_core::error::RequestError;
use hwcheck_core::hardware::HardwareHealthReading;
use hwcheck_core::health_check::{FAN_FIELDS_MISSING, POWER_SUPPLY_DESCRIPTION_MISSING};
use hwcheck_core::response::Response;
use hwcheck_core::status::StatusLevel;
use tokio_util::sync::CancellationToken;

const ADDRESS: &str = "192.0.2.10";

fn snapshot_check(dir: &Path, body: &str) -> CheckHardwareHealthRequest<SnapshotConnector> {
    std::fs::write(dir.join(format!("{ADDRESS}.json")), body).unwrap();
    CheckHardwareHealthRequest::new(
        BaseRequest::new(DeviceData::new(ADDRESS), Some(10)),
        SnapshotConnector::new(dir),
    )
}

fn points(response: &Response) -> Vec<(String, f64, Option<String>)> {
    response
        .performance_data()
        .iter()
        .map(|p| (p.name().to_string(), p.value(), p.label().map(str::to_string)))
        .collect()
}

// ---------------------------------------------------------------------------
// Readings through the full request path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn normal_environment_only() {
    let dir = tempfile::tempdir().unwrap();
    let request = snapshot_check(dir.path(), r#"{"environment_monitor_state": "normal"}"#);

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Ok);
    assert_eq!(
        points(&response),
        vec![("environment_monitor_state".to_string(), 1.0, None)]
    );
    assert_eq!(
        response.render(true),
        "OK: checked | 'environment_monitor_state'=1"
    );
}

#[tokio::test]
async fn critical_environment() {
    let dir = tempfile::tempdir().unwrap();
    let request = snapshot_check(dir.path(), r#"{"environment_monitor_state": "critical"}"#);

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Critical);
    assert_eq!(
        points(&response),
        vec![("environment_monitor_state".to_string(), 3.0, None)]
    );
}

#[tokio::test]
async fn fan_without_description() {
    let dir = tempfile::tempdir().unwrap();
    let request = snapshot_check(dir.path(), r#"{"fans": [{"state": "normal"}]}"#);

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Unknown);
    assert_eq!(response.message(), FAN_FIELDS_MISSING);
    assert!(response.performance_data().is_empty());
}

#[tokio::test]
async fn second_power_supply_without_description() {
    let dir = tempfile::tempdir().unwrap();
    let request = snapshot_check(
        dir.path(),
        r#"{"power_supplies": [
            {"description": "PS1", "state": "normal"},
            {"state": "normal"}
        ]}"#,
    );

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Unknown);
    assert_eq!(response.message(), POWER_SUPPLY_DESCRIPTION_MISSING);
    assert_eq!(
        points(&response),
        vec![("power_supply_state".to_string(), 1.0, Some("PS1".to_string()))]
    );
}

#[tokio::test]
async fn malformed_snapshot_halts_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let request = snapshot_check(dir.path(), "[1, 2, 3]");

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Unknown);
    assert!(response.message().starts_with(READ_FAILED));
}

// ---------------------------------------------------------------------------
// Pre-process failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_address_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let request = CheckHardwareHealthRequest::new(
        BaseRequest::new(DeviceData::new("not-an-ip"), None),
        SnapshotConnector::new(dir.path()),
    );

    let err = execute(request).await.unwrap_err();

    assert_matches!(err.error(), RequestError::Validation(_));
    assert!(err.response().message().starts_with("invalid request: "));
}

#[tokio::test]
async fn missing_snapshot_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let request = CheckHardwareHealthRequest::new(
        BaseRequest::new(DeviceData::new(ADDRESS), None),
        SnapshotConnector::new(dir.path()),
    );

    let err = execute(request).await.unwrap_err();

    assert_matches!(err.error(), RequestError::Connection(_));
    assert_eq!(err.response().status(), StatusLevel::Unknown);
}

// ---------------------------------------------------------------------------
// Connection lifecycle with an in-memory connector
// ---------------------------------------------------------------------------

struct MemoryConnector {
    reading: Result<HardwareHealthReading, RequestError>,
    closes: Arc<AtomicUsize>,
}

struct MemoryConnection {
    reading: Result<HardwareHealthReading, RequestError>,
    closes: Arc<AtomicUsize>,
}

impl Connection for MemoryConnection {
    fn close_connections(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DeviceConnection for MemoryConnection {
    async fn read_hardware_health(&mut self) -> Result<HardwareHealthReading, RequestError> {
        self.reading.clone()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Connection = MemoryConnection;

    async fn connect(
        &self,
        _device: &DeviceData,
        _cancel: &CancellationToken,
    ) -> Result<MemoryConnection, RequestError> {
        Ok(MemoryConnection {
            reading: self.reading.clone(),
            closes: self.closes.clone(),
        })
    }
}

#[tokio::test]
async fn read_failure_is_unknown_and_connection_closed() {
    let closes = Arc::new(AtomicUsize::new(0));
    let request = CheckHardwareHealthRequest::new(
        BaseRequest::new(DeviceData::new(ADDRESS), None),
        MemoryConnector {
            reading: Err(RequestError::Read("snmp walk failed".into())),
            closes: closes.clone(),
        },
    );

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Unknown);
    assert_eq!(
        response.message(),
        format!("{READ_FAILED}: read hardware health failed: snmp walk failed")
    );
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn healthy_reading_closes_connection_once() {
    let closes = Arc::new(AtomicUsize::new(0));
    let request = CheckHardwareHealthRequest::new(
        BaseRequest::new(DeviceData::new(ADDRESS), Some(5)),
        MemoryConnector {
            reading: Ok(HardwareHealthReading::default()),
            closes: closes.clone(),
        },
    );

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), StatusLevel::Ok);
    assert!(response.performance_data().is_empty());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}
