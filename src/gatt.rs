//! Typed access to GATT characteristics.
//!
//! [`TypedClient`] glues a [`GattClient`] to a [`Resolver`]: the first access
//! to a characteristic resolves its codec (reading the 0x2904 descriptor when
//! needed), later accesses reuse the cached codec.
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::gatt::mock_client::MockGattClient;
//! use gatt_marshal::gatt::{Characteristic, TypedClient};
//! use gatt_marshal::format::{FormatCode, PresentationFormat};
//! use gatt_marshal::{sig_uuid, Resolver, Value};
//!
//! // Temperature: sint16 in hundredths of a degree
//! let mut peripheral = MockGattClient::new();
//! peripheral.set_attribute(0x0020, &[0x6A, 0x08])?;
//! peripheral.set_presentation_format(0x0022, &PresentationFormat::new(FormatCode::Sint16, -2, 0x272F))?;
//!
//! let temperature = Characteristic::new(sig_uuid!(0x2A6E), 0x0020).with_presentation_format(0x0022);
//!
//! let resolver: Resolver = Resolver::new();
//! let mut client: TypedClient<'_, _> = TypedClient::new(peripheral, &resolver);
//! let value = embassy_futures::block_on(client.read(&temperature))?;
//! assert_eq!(value, Value::F64(21.54));
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::codec::{Codec, Value};
use crate::constants::{DEFAULT_CODEC_CACHE, DEFAULT_OVERRIDE_CAPACITY};
use crate::error::{MarshalError, Result};
use crate::resolver::Resolver;
use crate::uuid::CharacteristicUuid;
use heapless::LinearMap;

pub mod client;
pub mod mock_client;

#[doc(inline)]
pub use client::GattClient;

/// Characteristic metadata produced by service discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Characteristic {
    /// Characteristic UUID
    pub uuid: CharacteristicUuid,
    /// Handle of the characteristic value attribute
    pub value_handle: u16,
    /// Handle of the 0x2904 descriptor, if the characteristic has one
    pub presentation_format_handle: Option<u16>,
}

impl Characteristic {
    /// Create a characteristic without a presentation format descriptor.
    #[inline]
    pub const fn new(uuid: CharacteristicUuid, value_handle: u16) -> Self {
        Self {
            uuid,
            value_handle,
            presentation_format_handle: None,
        }
    }

    /// Attach the handle of the 0x2904 descriptor.
    #[inline]
    #[must_use]
    pub const fn with_presentation_format(mut self, handle: u16) -> Self {
        self.presentation_format_handle = Some(handle);
        self
    }
}

/// GATT client that reads and writes typed values
///
/// `N` is the override capacity of the resolver, `CACHE` the number of
/// resolved codecs remembered. When the cache is full new codecs are still
/// resolved, just not remembered.
#[derive(Debug)]
pub struct TypedClient<
    'r,
    C,
    const N: usize = DEFAULT_OVERRIDE_CAPACITY,
    const CACHE: usize = DEFAULT_CODEC_CACHE,
> {
    client: C,
    resolver: &'r Resolver<N>,
    codecs: LinearMap<u16, Codec, CACHE>,
}

impl<'r, C: GattClient, const N: usize, const CACHE: usize> TypedClient<'r, C, N, CACHE> {
    /// Wrap a GATT client.
    pub fn new(client: C, resolver: &'r Resolver<N>) -> Self {
        Self {
            client,
            resolver,
            codecs: LinearMap::new(),
        }
    }

    /// Get a reference to the underlying client
    #[inline]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a mutable reference to the underlying client
    #[inline]
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Unwrap the underlying client, dropping the codec cache.
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Resolve the codec of `chr`, from cache if possible.
    ///
    /// UUIDs with a registered override never trigger a descriptor read.
    ///
    /// # Errors
    ///
    /// Client errors from the descriptor read and descriptor errors from
    /// resolution. Failures are not cached.
    pub async fn codec(&mut self, chr: &Characteristic) -> Result<Codec> {
        if let Some(codec) = self.codecs.get(&chr.value_handle) {
            return Ok(*codec);
        }

        let descriptor = match chr.presentation_format_handle {
            Some(handle) if !self.resolver.registry().contains(&chr.uuid) => {
                self.ensure_connected()?;
                gatt_log!(trace, "Reading presentation format at handle {}", handle);
                Some(self.client.read_descriptor(handle).await?)
            }
            _ => None,
        };
        let codec = self.resolver.resolve(Some(&chr.uuid), descriptor.as_deref())?;

        if self.codecs.insert(chr.value_handle, codec).is_err() {
            gatt_log!(debug, "Codec cache full, handle {} not cached", chr.value_handle);
        }
        Ok(codec)
    }

    /// Read and unmarshall the value of `chr`.
    ///
    /// # Errors
    ///
    /// Disconnected, without touching the client, if the link is down.
    pub async fn read(&mut self, chr: &Characteristic) -> Result<Value> {
        self.ensure_connected()?;
        let codec = self.codec(chr).await?;
        let data = self.client.read_characteristic(chr.value_handle).await?;
        gatt_log!(trace, "Read {} bytes from handle {}", data.len(), chr.value_handle);
        codec.unmarshall(&data)
    }

    /// Marshall `value` and write it to `chr`.
    ///
    /// Nothing is written if marshalling fails or the link is down.
    pub async fn write(&mut self, chr: &Characteristic, value: &Value) -> Result<()> {
        self.ensure_connected()?;
        let codec = self.codec(chr).await?;
        let data = codec.marshall(value)?;
        gatt_log!(trace, "Writing {} bytes to handle {}", data.len(), chr.value_handle);
        self.client.write_characteristic(chr.value_handle, &data).await
    }

    /// Forget the cached codec of one value handle.
    pub fn invalidate(&mut self, value_handle: u16) {
        self.codecs.remove(&value_handle);
    }

    /// Forget all cached codecs (e.g. after reconnecting to a different peer).
    pub fn clear_cache(&mut self) {
        self.codecs.clear();
    }

    /// Number of cached codecs
    #[inline]
    pub fn cached(&self) -> usize {
        self.codecs.len()
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.client.is_connected() {
            Ok(())
        } else {
            gatt_log!(debug, "GATT link down");
            Err(MarshalError::disconnected())
        }
    }
}
