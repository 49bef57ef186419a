//! Per-characteristic codec overrides.
//!
//! Some characteristics have an encoding that is known out of band and that
//! their 0x2904 descriptor describes badly or not at all. An
//! [`OverrideRegistry`] maps such UUIDs to a codec constructor that takes
//! precedence over the descriptor.
//!
//! Registration is additive: a UUID can be registered once and entries are
//! never replaced or removed. Registration needs `&mut self`, lookups only
//! `&self`, so a registry shared between tasks must be fully populated
//! before it is shared (or guarded by the caller).
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::{Codec, CharacteristicUuid, OverrideRegistry};
//! use gatt_marshal::format::FormatCode;
//!
//! // Vendor temperature characteristic: sint16 in hundredths of a degree
//! fn vendor_temperature() -> Codec {
//!     Codec::for_format(FormatCode::Sint16.to_u8(), -2, 0x272F).unwrap_or_default()
//! }
//!
//! let uuid: CharacteristicUuid = "6e400003-b5a3-f393-e0a9-e50e24dcca9e".parse()?;
//! let mut registry: OverrideRegistry = OverrideRegistry::new();
//! registry.register(uuid, vendor_temperature)?;
//!
//! assert!(registry.lookup(&uuid).is_some());
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::codec::Codec;
use crate::constants::DEFAULT_OVERRIDE_CAPACITY;
use crate::error::{MarshalError, Result};
use crate::uuid::CharacteristicUuid;
use heapless::LinearMap;

/// Constructor producing a fresh codec for an overridden characteristic
pub type CodecConstructor = fn() -> Codec;

/// Bounded UUID → codec constructor map
pub struct OverrideRegistry<const N: usize = DEFAULT_OVERRIDE_CAPACITY> {
    entries: LinearMap<CharacteristicUuid, CodecConstructor, N>,
}

impl<const N: usize> OverrideRegistry<N> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    /// Register an override for `uuid`.
    ///
    /// # Errors
    ///
    /// - Already registered if `uuid` has an override
    /// - Full if the registry has no free slot
    pub fn register(&mut self, uuid: CharacteristicUuid, constructor: CodecConstructor) -> Result<()> {
        if self.entries.contains_key(&uuid) {
            return Err(MarshalError::already_registered());
        }
        self.entries
            .insert(uuid, constructor)
            .map_err(|_rejected| MarshalError::registry_full())?;
        gatt_log!(debug, "Registered codec override for {}", uuid);
        Ok(())
    }

    /// Construct the override codec for `uuid`, if registered.
    #[inline]
    pub fn lookup(&self, uuid: &CharacteristicUuid) -> Option<Codec> {
        self.entries.get(uuid).map(|constructor| constructor())
    }

    /// Check if `uuid` has an override
    #[inline]
    pub fn contains(&self, uuid: &CharacteristicUuid) -> bool {
        self.entries.contains_key(uuid)
    }

    /// Number of registered overrides
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no override is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered UUIDs
    pub fn uuids(&self) -> impl Iterator<Item = &CharacteristicUuid> {
        self.entries.keys()
    }
}

impl<const N: usize> Default for OverrideRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for OverrideRegistry<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverrideRegistry")
            .field("len", &self.entries.len())
            .field("capacity", &N)
            .finish()
    }
}
