//! Hardware health requests.
//!
//! [`ReadHardwareHealthRequest`] fetches the raw reading from a device
//! connection. [`CheckHardwareHealthRequest`] composes it with the status
//! pipeline from `hwcheck-core` to produce a monitoring verdict.

use async_trait::async_trait;
use hwcheck_core::aggregator::StatusAggregator;
use hwcheck_core::error::RequestError;
use hwcheck_core::hardware::HardwareHealthReading;
use hwcheck_core::health_check;
use hwcheck_core::status::StatusLevel;
use tokio_util::sync::CancellationToken;

use crate::connection::{Connector, DeviceConnection};
use crate::request::{BaseRequest, Outcome, Request};

/// Halt message when the nested read fails.
pub const READ_FAILED: &str = "error while processing read hardware health request";

/// Reads hardware health over an established connection.
pub struct ReadHardwareHealthRequest<'a> {
    base: &'a BaseRequest,
}

impl<'a> ReadHardwareHealthRequest<'a> {
    pub fn new(base: &'a BaseRequest) -> Self {
        Self { base }
    }

    pub async fn process<C: DeviceConnection>(
        &self,
        connection: &mut C,
    ) -> Result<HardwareHealthReading, RequestError> {
        let reading = connection.read_hardware_health().await?;
        tracing::debug!(
            address = %self.base.device.ip_address,
            fans = reading.fans.len(),
            power_supplies = reading.power_supplies.len(),
            "Read hardware health",
        );
        Ok(reading)
    }
}

/// Checks a device's environment monitor, fans and power supplies.
pub struct CheckHardwareHealthRequest<K> {
    base: BaseRequest,
    connector: K,
}

impl<K: Connector> CheckHardwareHealthRequest<K> {
    pub fn new(base: BaseRequest, connector: K) -> Self {
        Self { base, connector }
    }
}

#[async_trait]
impl<K: Connector> Request for CheckHardwareHealthRequest<K> {
    type Connection = K::Connection;

    fn validate(&self) -> Result<(), RequestError> {
        self.base.device.check()
    }

    fn timeout_secs(&self) -> Option<u64> {
        self.base.timeout_secs
    }

    async fn setup_connection(
        &self,
        cancel: &CancellationToken,
    ) -> Result<K::Connection, RequestError> {
        self.connector.connect(&self.base.device, cancel).await
    }

    async fn process(&self, connection: &mut K::Connection, _cancel: &CancellationToken) -> Outcome {
        let mut aggregator = StatusAggregator::new();

        let read = ReadHardwareHealthRequest::new(&self.base)
            .process(connection)
            .await;
        let reading = match aggregator.require_ok(read, StatusLevel::Unknown, READ_FAILED) {
            Ok(reading) => reading,
            Err(_halted) => return Ok(aggregator.finalize()),
        };

        let response = health_check::run(aggregator, &reading);
        tracing::info!(
            address = %self.base.device.ip_address,
            status = %response.status(),
            message = response.message(),
            points = response.performance_data().len(),
            "Hardware health checked",
        );
        Ok(response)
    }
}
