//! The request capability contract consumed by the executor.

use async_trait::async_trait;
use hwcheck_core::device::DeviceData;
use hwcheck_core::error::RequestError;
use hwcheck_core::response::Response;
use tokio_util::sync::CancellationToken;

use crate::connection::Connection;

/// Result of executing a request. Both arms carry a renderable
/// [`Response`].
pub type Outcome = Result<Response, ExecutionError>;

/// A request failure paired with the best-effort response built for it.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ExecutionError {
    response: Response,
    error: RequestError,
}

impl ExecutionError {
    pub fn new(response: Response, error: RequestError) -> Self {
        Self { response, error }
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn error(&self) -> &RequestError {
        &self.error
    }
}

/// Fields shared by every device request.
#[derive(Debug, Clone, Default)]
pub struct BaseRequest {
    pub device: DeviceData,
    /// Seconds to wait for a result; `None` or `0` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl BaseRequest {
    pub fn new(device: DeviceData, timeout_secs: Option<u64>) -> Self {
        Self {
            device,
            timeout_secs,
        }
    }
}

/// A unit of work the executor can run against a device.
///
/// The executor calls [`validate`](Request::validate) first, then
/// [`setup_connection`](Request::setup_connection) and
/// [`process`](Request::process) on a spawned task. Every failure outside
/// `process` goes through
/// [`handle_pre_process_error`](Request::handle_pre_process_error).
#[async_trait]
pub trait Request: Send + Sync + 'static {
    type Connection: Connection;

    fn validate(&self) -> Result<(), RequestError>;

    fn timeout_secs(&self) -> Option<u64>;

    async fn setup_connection(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Self::Connection, RequestError>;

    /// The check body. `cancel` fires once the executor stops waiting.
    async fn process(&self, connection: &mut Self::Connection, cancel: &CancellationToken)
        -> Outcome;

    /// Turn a failure into an outcome. Must never fail to build a response.
    fn handle_pre_process_error(&self, error: RequestError) -> Outcome {
        Err(ExecutionError::new(Response::unknown(error.to_string()), error))
    }
}
