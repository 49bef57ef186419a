//! Bluetooth SIG assigned numbers and crate-wide limits.

/// Characteristic Presentation Format descriptor UUID (16-bit alias)
pub const PRESENTATION_FORMAT_UUID: u16 = 0x2904;

/// Size of the Characteristic Presentation Format descriptor value
pub const PRESENTATION_FORMAT_LEN: usize = 7;

/// Maximum length of an ATT attribute value (Core Spec Vol 3, Part F, 3.2.9)
pub const MAX_VALUE_LEN: usize = 512;

/// Bluetooth Base UUID used to expand 16-bit and 32-bit SIG aliases
pub const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5f9b_34fb;

/// Presentation format namespace for Bluetooth SIG assigned descriptions
pub const NAMESPACE_BLUETOOTH_SIG: u8 = 0x01;

/// Default number of UUID overrides a registry can hold
pub const DEFAULT_OVERRIDE_CAPACITY: usize = 16;

/// Default number of resolved codecs cached by the typed client
pub const DEFAULT_CODEC_CACHE: usize = 32;
