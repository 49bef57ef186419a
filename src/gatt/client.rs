//! GATT client abstraction.
//!
//! This module provides the `GattClient` trait that abstracts the Bluetooth
//! stack performing attribute reads and writes, enabling:
//! - Testability through the [`MockGattClient`](super::mock_client::MockGattClient)
//! - Any host stack (trouble, nrf-softdevice, a desktop bridge) behind one interface
//!
//! Service discovery is not part of this trait: callers hand the
//! [`TypedClient`](super::TypedClient) the handles discovery produced.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gatt_marshal::gatt::client::GattClient;
//! use gatt_marshal::{Payload, Result};
//!
//! struct SoftdeviceClient {
//!     // ... connection handle
//! }
//!
//! impl GattClient for SoftdeviceClient {
//!     async fn read_descriptor(&mut self, handle: u16) -> Result<Payload> {
//!         // Issue an ATT Read Request on the descriptor handle
//!         # Ok(Payload::new())
//!     }
//!
//!     async fn read_characteristic(&mut self, handle: u16) -> Result<Payload> {
//!         // Issue an ATT Read (Blob) Request on the value handle
//!         # Ok(Payload::new())
//!     }
//!
//!     async fn write_characteristic(&mut self, handle: u16, data: &[u8]) -> Result<()> {
//!         // Issue an ATT Write Request
//!         Ok(())
//!     }
//! }
//! ```

use crate::codec::Payload;
use crate::error::Result;

/// Asynchronous GATT attribute access.
///
/// Implementations map stack failures onto the client error category
/// ([`MarshalError::read_failed`](crate::MarshalError::read_failed),
/// [`MarshalError::disconnected`](crate::MarshalError::disconnected), ...).
#[allow(async_fn_in_trait, reason = "Embedded executors are single-threaded, Send bounds are not needed")]
pub trait GattClient {
    /// Read the value of a descriptor.
    ///
    /// # Arguments
    ///
    /// * `handle` - Attribute handle of the descriptor
    async fn read_descriptor(&mut self, handle: u16) -> Result<Payload>;

    /// Read the value of a characteristic.
    ///
    /// # Arguments
    ///
    /// * `handle` - Value handle of the characteristic
    async fn read_characteristic(&mut self, handle: u16) -> Result<Payload>;

    /// Write the value of a characteristic (write with response).
    ///
    /// # Arguments
    ///
    /// * `handle` - Value handle of the characteristic
    /// * `data` - Marshalled value bytes
    async fn write_characteristic(&mut self, handle: u16, data: &[u8]) -> Result<()>;

    /// Check if the link to the peripheral is up.
    ///
    /// # Default Implementation
    ///
    /// Always `true`. Override if the stack tracks connection state.
    fn is_connected(&self) -> bool {
        true
    }
}
