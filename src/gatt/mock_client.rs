//! Mock GATT client for testing.
//!
//! This module provides an in-memory implementation of [`GattClient`] that
//! can be used in unit tests to simulate a peripheral without a radio.
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::gatt::client::GattClient;
//! use gatt_marshal::gatt::mock_client::MockGattClient;
//!
//! let mut mock = MockGattClient::new();
//! mock.set_attribute(0x0010, &[87])?;
//!
//! let value = embassy_futures::block_on(mock.read_characteristic(0x0010))?;
//! assert_eq!(value.as_slice(), &[87]);
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::codec::Payload;
use crate::error::{MarshalError, Result};
use crate::format::PresentationFormat;
use crate::gatt::client::GattClient;
use heapless::{LinearMap, Vec};

/// Maximum number of attributes the mock can hold
pub const MOCK_ATTRIBUTES: usize = 16;

/// Maximum number of writes kept in the history (oldest dropped first)
pub const MOCK_WRITE_HISTORY: usize = 8;

/// Mock peripheral for testing typed GATT access without a radio.
///
/// This mock client allows you to:
/// - Pre-program attribute values (characteristics and descriptors share one handle space)
/// - Inspect writes issued via `write_characteristic()`
/// - Count descriptor reads to verify codec caching
/// - Simulate disconnection and read/write failures
#[derive(Debug)]
pub struct MockGattClient {
    attributes: LinearMap<u16, Payload, MOCK_ATTRIBUTES>,
    writes: Vec<(u16, Payload), MOCK_WRITE_HISTORY>,
    descriptor_reads: usize,
    characteristic_reads: usize,
    connected: bool,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockGattClient {
    /// Create a new, connected mock with no attributes.
    pub fn new() -> Self {
        Self {
            attributes: LinearMap::new(),
            writes: Vec::new(),
            descriptor_reads: 0,
            characteristic_reads: 0,
            connected: true,
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Set the value of an attribute, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a payload-too-large error if `data` exceeds the attribute size
    /// limit, or a registry-full error if the mock has no free attribute slot.
    pub fn set_attribute(&mut self, handle: u16, data: &[u8]) -> Result<()> {
        let payload = Payload::from_slice(data).map_err(|_full| MarshalError::payload_too_large())?;
        self.attributes
            .insert(handle, payload)
            .map_err(|_rejected| MarshalError::registry_full())?;
        Ok(())
    }

    /// Store a 0x2904 descriptor at `handle`.
    pub fn set_presentation_format(&mut self, handle: u16, pf: &PresentationFormat) -> Result<()> {
        self.set_attribute(handle, &pf.to_bytes())
    }

    /// Current value of an attribute
    pub fn attribute(&self, handle: u16) -> Option<&[u8]> {
        self.attributes.get(&handle).map(|payload| payload.as_slice())
    }

    /// All writes still in the history, oldest first
    pub fn writes(&self) -> &[(u16, Payload)] {
        &self.writes
    }

    /// The most recent write
    pub fn last_write(&self) -> Option<&(u16, Payload)> {
        self.writes.last()
    }

    /// Clear the write history.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Number of descriptor reads served so far
    pub fn descriptor_reads(&self) -> usize {
        self.descriptor_reads
    }

    /// Number of characteristic reads served so far
    pub fn characteristic_reads(&self) -> usize {
        self.characteristic_reads
    }

    /// Simulate a link loss (or reconnection).
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Make every read fail with a read error.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every write fail with a write error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn read(&self, handle: u16) -> Result<Payload> {
        if !self.connected {
            return Err(MarshalError::disconnected());
        }
        if self.fail_reads {
            return Err(MarshalError::read_failed());
        }
        self.attributes
            .get(&handle)
            .cloned()
            .ok_or_else(MarshalError::read_failed)
    }
}

impl Default for MockGattClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GattClient for MockGattClient {
    async fn read_descriptor(&mut self, handle: u16) -> Result<Payload> {
        let payload = self.read(handle)?;
        self.descriptor_reads += 1;
        Ok(payload)
    }

    async fn read_characteristic(&mut self, handle: u16) -> Result<Payload> {
        let payload = self.read(handle)?;
        self.characteristic_reads += 1;
        Ok(payload)
    }

    async fn write_characteristic(&mut self, handle: u16, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(MarshalError::disconnected());
        }
        if self.fail_writes {
            return Err(MarshalError::write_failed());
        }

        let payload = Payload::from_slice(data).map_err(|_full| MarshalError::payload_too_large())?;
        self.attributes
            .insert(handle, payload.clone())
            .map_err(|_rejected| MarshalError::write_failed())?;

        // Only writes that reached the store are recorded
        if self.writes.is_full() {
            self.writes.remove(0);
        }
        let _ = self.writes.push((handle, payload));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
