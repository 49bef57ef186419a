//! Codec resolution for a characteristic.
//!
//! The resolver picks the codec for a characteristic in strict priority order:
//!
//! 1. **UUID override** - a registered override wins over anything the
//!    device reports, even a malformed descriptor.
//! 2. **Presentation format** - the 0x2904 descriptor is parsed; a malformed
//!    descriptor is an error, a supported format yields a
//!    [`ScaledPackCodec`](crate::codec::ScaledPackCodec) and an unsupported
//!    one falls through.
//! 3. **Identity** - raw bytes.
//!
//! Resolution is pure: reading the descriptor from the device is the job of
//! the GATT client (see [`gatt`](crate::gatt)).
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::{Resolver, Value};
//!
//! let resolver: Resolver = Resolver::new();
//!
//! // uint16, exponent -2
//! let codec = resolver.resolve(None, Some(&[0x06, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00]))?;
//! assert_eq!(codec.unmarshall(&[0xE8, 0x03])?, Value::F64(10.0));
//!
//! // No descriptor: raw bytes
//! assert!(resolver.resolve(None, None)?.is_identity());
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::codec::{Codec, ScaledPackCodec};
use crate::constants::DEFAULT_OVERRIDE_CAPACITY;
use crate::error::Result;
use crate::format::PresentationFormat;
use crate::registry::{CodecConstructor, OverrideRegistry};
use crate::uuid::CharacteristicUuid;

/// Resolves the codec of a characteristic
#[derive(Debug, Default)]
pub struct Resolver<const N: usize = DEFAULT_OVERRIDE_CAPACITY> {
    registry: OverrideRegistry<N>,
}

impl<const N: usize> Resolver<N> {
    /// Create a resolver with an empty override registry.
    pub const fn new() -> Self {
        Self {
            registry: OverrideRegistry::new(),
        }
    }

    /// Create a resolver owning a pre-populated registry.
    pub const fn with_registry(registry: OverrideRegistry<N>) -> Self {
        Self { registry }
    }

    /// Get the override registry
    #[inline]
    pub fn registry(&self) -> &OverrideRegistry<N> {
        &self.registry
    }

    /// Register a UUID override.
    ///
    /// See [`OverrideRegistry::register`].
    pub fn register(&mut self, uuid: CharacteristicUuid, constructor: CodecConstructor) -> Result<()> {
        self.registry.register(uuid, constructor)
    }

    /// Resolve the codec for a characteristic.
    ///
    /// # Arguments
    ///
    /// * `uuid` - Characteristic UUID, if known
    /// * `descriptor` - Raw 0x2904 descriptor value, if the characteristic has one
    ///
    /// # Errors
    ///
    /// Returns a descriptor error if `descriptor` is present but not exactly
    /// 7 bytes (unless `uuid` has an override). There is no fallback in that case.
    pub fn resolve(&self, uuid: Option<&CharacteristicUuid>, descriptor: Option<&[u8]>) -> Result<Codec> {
        if let Some(codec) = uuid.and_then(|uuid| self.registry.lookup(uuid)) {
            gatt_log!(debug, "Using registered codec override");
            return Ok(codec);
        }

        if let Some(data) = descriptor {
            let pf = PresentationFormat::parse(data).inspect_err(|_e| {
                gatt_log!(warn, "Malformed presentation format descriptor ({} bytes)", data.len());
            })?;

            if let Some(entry) = pf.entry() {
                gatt_log!(
                    debug,
                    "Presentation format {} exponent {} unit {}",
                    pf.format,
                    pf.exponent,
                    pf.unit
                );
                return Ok(Codec::ScaledPack(ScaledPackCodec::new(entry, pf.exponent, pf.unit)));
            }

            gatt_log!(warn, "Unsupported presentation format {}, using raw bytes", pf.format);
        }

        Ok(Codec::Identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;
    use crate::error::MarshalError;
    use crate::format::FormatCode;

    const UINT16: [u8; 7] = [0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    const UINT16_CENTI: [u8; 7] = [0x06, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00];

    fn vendor_codec() -> Codec {
        Codec::for_format(FormatCode::Sint32.to_u8(), -3, 0).unwrap_or_default()
    }

    fn vendor_uuid() -> CharacteristicUuid {
        "6e400003-b5a3-f393-e0a9-e50e24dcca9e".parse().unwrap()
    }

    fn resolver_with_override() -> Resolver<4> {
        let mut resolver = Resolver::new();
        resolver.register(vendor_uuid(), vendor_codec).unwrap();
        resolver
    }

    #[test]
    fn test_no_inputs_is_identity() {
        let resolver: Resolver<4> = Resolver::new();
        assert_eq!(resolver.resolve(None, None).unwrap(), Codec::Identity);
    }

    #[test]
    fn test_descriptor_uint16() {
        let resolver: Resolver<4> = Resolver::new();
        let codec = resolver.resolve(None, Some(&UINT16)).unwrap();
        assert_eq!(codec.unmarshall(&[0xE8, 0x03]).unwrap(), Value::U16(1000));
    }

    #[test]
    fn test_descriptor_scaled() {
        let resolver: Resolver<4> = Resolver::new();
        let codec = resolver.resolve(None, Some(&UINT16_CENTI)).unwrap();
        assert_eq!(codec.unmarshall(&[0xE8, 0x03]).unwrap(), Value::F64(10.0));
        assert_eq!(codec.marshall(&Value::F64(10.0)).unwrap().as_slice(), &[0xE8, 0x03]);
    }

    #[test]
    fn test_unsupported_format_falls_back() {
        let resolver: Resolver<4> = Resolver::new();
        let codec = resolver.resolve(None, Some(&[99, 0, 0, 0, 0, 0, 0])).unwrap();
        assert!(codec.is_identity());

        // Reserved 24-bit integer
        let codec = resolver.resolve(None, Some(&[0x07, 0, 0, 0, 0, 0, 0])).unwrap();
        assert!(codec.is_identity());
    }

    #[test]
    fn test_malformed_descriptor_propagates() {
        let resolver: Resolver<4> = Resolver::new();
        let result = resolver.resolve(None, Some(&UINT16[..6]));
        assert!(matches!(result, Err(MarshalError::Descriptor(ref e)) if e.is_invalid_length()));

        // An unregistered UUID does not change that
        let result = resolver.resolve(Some(&CharacteristicUuid::from_u16(0x2A19)), Some(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_override_wins_over_descriptor() {
        let resolver = resolver_with_override();
        let uuid = vendor_uuid();

        assert_eq!(resolver.resolve(Some(&uuid), Some(&UINT16)).unwrap(), vendor_codec());
        assert_eq!(resolver.resolve(Some(&uuid), None).unwrap(), vendor_codec());
    }

    #[test]
    fn test_override_wins_over_malformed_descriptor() {
        let resolver = resolver_with_override();
        let codec = resolver.resolve(Some(&vendor_uuid()), Some(&[0x06, 0x00])).unwrap();
        assert_eq!(codec, vendor_codec());
    }

    #[test]
    fn test_unregistered_uuid_uses_descriptor() {
        let resolver = resolver_with_override();
        let other = CharacteristicUuid::from_u16(0x2A19);
        let codec = resolver.resolve(Some(&other), Some(&UINT16)).unwrap();
        assert_eq!(codec, Codec::for_format(0x06, 0, 0).unwrap());
    }

    #[test]
    fn test_with_registry() {
        let mut registry: OverrideRegistry<2> = OverrideRegistry::new();
        registry.register(vendor_uuid(), vendor_codec).unwrap();
        let resolver = Resolver::with_registry(registry);
        assert_eq!(resolver.registry().len(), 1);
        assert_eq!(resolver.resolve(Some(&vendor_uuid()), None).unwrap(), vendor_codec());
    }
}
