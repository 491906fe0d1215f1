//! Device connection capabilities.
//!
//! The wire protocol used to talk to a device lives behind these traits.
//! A [`Connector`] establishes a [`DeviceConnection`]; the executor wraps
//! it in a [`ConnectionGuard`] so that it is closed exactly once when the
//! check task ends, however it ends.

use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use hwcheck_core::device::DeviceData;
use hwcheck_core::error::RequestError;
use hwcheck_core::hardware::HardwareHealthReading;
use tokio_util::sync::CancellationToken;

/// An exclusively owned connection resource.
pub trait Connection: Send + 'static {
    /// Release every resource held by the connection. Must be idempotent.
    fn close_connections(&mut self);
}

/// A connection that can read hardware health from its device.
#[async_trait]
pub trait DeviceConnection: Connection {
    async fn read_hardware_health(&mut self) -> Result<HardwareHealthReading, RequestError>;
}

/// Establishes connections to devices.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Connection: DeviceConnection;

    /// Connect to `device`. Implementations may watch `cancel` to give up
    /// early once the requester has stopped waiting.
    async fn connect(
        &self,
        device: &DeviceData,
        cancel: &CancellationToken,
    ) -> Result<Self::Connection, RequestError>;
}

/// Closes the wrapped connection when dropped.
///
/// Drop also runs while a panic unwinds, so the connection is released on
/// success, error and fault alike.
pub struct ConnectionGuard<C: Connection> {
    inner: C,
}

impl<C: Connection> ConnectionGuard<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Connection> Deref for ConnectionGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C: Connection> DerefMut for ConnectionGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: Connection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        self.inner.close_connections();
    }
}
