//! Convenience macros for characteristic UUIDs and codec overrides.
//!
//! This module provides declarative macros that keep resolver setup short
//! and readable.

/// Creates a [`CharacteristicUuid`](crate::CharacteristicUuid) from a Bluetooth SIG alias.
///
/// The alias is expanded over the Bluetooth Base UUID at compile time.
///
/// # Syntax
///
/// ```text
/// sig_uuid!(alias)
/// ```
///
/// Where `alias` is a 16-bit or 32-bit assigned number.
///
/// # Examples
///
/// ```rust
/// use gatt_marshal::sig_uuid;
///
/// let battery_level = sig_uuid!(0x2A19);
/// assert_eq!(battery_level.to_string(), "00002a19-0000-1000-8000-00805f9b34fb");
/// assert_eq!(battery_level.as_u16(), Some(0x2A19));
/// ```
///
/// # Equivalent Code
///
/// ```rust
/// use gatt_marshal::{sig_uuid, CharacteristicUuid};
///
/// assert_eq!(sig_uuid!(0x2A19), CharacteristicUuid::from_u32(0x2A19));
/// ```
#[macro_export]
macro_rules! sig_uuid {
    ($alias:literal) => {{
        const UUID: $crate::CharacteristicUuid = $crate::CharacteristicUuid::from_u32($alias);
        UUID
    }};
}

/// Registers multiple codec overrides in a single block.
///
/// # Syntax
///
/// ```text
/// register_overrides! {
///     resolver,
///     uuid => constructor,
///     uuid => constructor,
///     ...
/// }
/// ```
///
/// # Examples
///
/// ```rust
/// use gatt_marshal::{register_overrides, sig_uuid, Codec, Resolver};
/// use gatt_marshal::format::FormatCode;
///
/// fn centi_celsius() -> Codec {
///     Codec::for_format(FormatCode::Sint16.to_u8(), -2, 0x272F).unwrap_or_default()
/// }
///
/// fn raw() -> Codec {
///     Codec::Identity
/// }
///
/// let mut resolver: Resolver = Resolver::new();
/// register_overrides! {
///     resolver,
///     sig_uuid!(0x2A6E) => centi_celsius,
///     "6e400003-b5a3-f393-e0a9-e50e24dcca9e".parse()? => raw,
/// }?;
/// assert_eq!(resolver.registry().len(), 2);
/// # Ok::<(), gatt_marshal::MarshalError>(())
/// ```
///
/// # Returns
///
/// - `Ok(())` - All registrations successful
/// - `Err(MarshalError::Registry(_))` - Registry full or UUID already registered.
///   Overrides before the failing one stay registered.
#[macro_export]
macro_rules! register_overrides {
    ($resolver:expr, $( $uuid:expr => $ctor:expr ),* $(,)?) => {{
        // Use a closure to allow early return with ?
        (|| -> $crate::Result<()> {
            $(
                $resolver.register($uuid, $ctor)?;
            )*
            Ok(())
        })()
    }};
}
