//! Deadline derivation for a request.

use std::time::Duration;

use tokio::time::Instant;

/// Deadline for a request started at `now`.
///
/// `None` and `Some(0)` mean no intrinsic deadline: the request is then
/// bounded only by the caller's cancellation token. A timeout too large to
/// represent as an instant is treated the same way.
pub fn deadline(timeout_secs: Option<u64>, now: Instant) -> Option<Instant> {
    match timeout_secs {
        None | Some(0) => None,
        Some(secs) => now.checked_add(Duration::from_secs(secs)),
    }
}

/// Resolve once `deadline` passes; never resolve without one.
pub async fn expired(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
