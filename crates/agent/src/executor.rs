//! Bounded-time request execution.
//!
//! [`execute`] validates a request, then spawns one task that connects to
//! the device and runs the check body behind the [fault barrier]. The
//! caller waits for whichever comes first: the task's outcome, the
//! request deadline, or cancellation of the caller's token.
//!
//! Timing out ends the *wait*, not the task. When `execute` returns, the
//! request's cancellation token is cancelled so a cooperative task can
//! stop early, but the task is neither aborted nor joined. It keeps its
//! connection until it finishes on its own, and the [`ConnectionGuard`]
//! closes the connection then.
//!
//! [fault barrier]: crate::fault::contain

use std::sync::Arc;

use hwcheck_core::error::RequestError;
use hwcheck_core::response::Response;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::connection::ConnectionGuard;
use crate::fault;
use crate::request::{ExecutionError, Outcome, Request};
use crate::timeout;

/// Execute `request` with no caller-supplied cancellation.
pub async fn execute<R: Request>(request: R) -> Outcome {
    execute_with_cancel(request, &CancellationToken::new()).await
}

/// Execute `request`, giving up early if `cancel` fires.
///
/// Always resolves to exactly one outcome carrying a response.
pub async fn execute_with_cancel<R: Request>(request: R, cancel: &CancellationToken) -> Outcome {
    if let Err(e) = request.validate() {
        tracing::warn!(error = %e, "Rejecting invalid request");
        return request.handle_pre_process_error(e);
    }

    let request = Arc::new(request);
    let timeout_secs = request.timeout_secs();
    let deadline = timeout::deadline(timeout_secs, Instant::now());

    // Cancelled when this function returns, whatever the outcome.
    let scope = cancel.child_token();
    let _scope_guard = scope.clone().drop_guard();

    let (tx, rx) = oneshot::channel();
    tokio::spawn(run_task(Arc::clone(&request), scope, tx));

    tokio::select! {
        biased;

        delivered = rx => match delivered {
            Ok(outcome) => outcome,
            Err(_) => {
                // Only reachable if the task died outside the fault barrier,
                // e.g. in the request's own error handler, so it is not
                // consulted again here.
                tracing::error!("Check task ended without delivering an outcome");
                let error = RequestError::Fault(
                    "check task ended without delivering an outcome".to_string(),
                );
                Err(ExecutionError::new(Response::unknown(error.to_string()), error))
            }
        },
        _ = timeout::expired(deadline) => {
            tracing::warn!(timeout_secs, "Request timed out");
            request.handle_pre_process_error(RequestError::Timeout)
        }
        _ = cancel.cancelled() => {
            tracing::info!("Request cancelled by caller");
            request.handle_pre_process_error(RequestError::Cancelled)
        }
    }
}

/// Task entry point: run the body behind the fault barrier and deliver
/// the outcome.
async fn run_task<R: Request>(
    request: Arc<R>,
    scope: CancellationToken,
    tx: oneshot::Sender<Outcome>,
) {
    let outcome = match fault::contain(connect_and_process(request.as_ref(), &scope)).await {
        Ok(outcome) => outcome,
        Err(fault) => {
            tracing::error!(error = %fault, "Check task faulted");
            request.handle_pre_process_error(fault)
        }
    };

    if tx.send(outcome).is_err() {
        tracing::debug!("Executor stopped waiting; discarding late outcome");
    }
}

async fn connect_and_process<R: Request>(request: &R, scope: &CancellationToken) -> Outcome {
    let connection = match request.setup_connection(scope).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!(error = %e, "Connection setup failed");
            return request.handle_pre_process_error(e);
        }
    };

    // Dropped on every exit path of this function, including unwinding.
    let mut connection = ConnectionGuard::new(connection);
    // Bound to a local so the process future is dropped before the guard.
    let outcome = request.process(&mut *connection, scope).await;
    outcome
}
