//! Fault isolation for the check task.
//!
//! A panic inside the task body is caught at the task's entry point and
//! turned into [`RequestError::Fault`], so it travels back to the executor
//! through the same channel as any other outcome.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use hwcheck_core::error::RequestError;

/// Run `body`, converting a panic into [`RequestError::Fault`].
pub async fn contain<F>(body: F) -> Result<F::Output, RequestError>
where
    F: Future,
{
    AssertUnwindSafe(body)
        .catch_unwind()
        .await
        .map_err(|payload| RequestError::Fault(describe(&*payload)))
}

/// Best-effort text of a panic payload.
fn describe(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
