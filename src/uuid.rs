//! Characteristic UUIDs.
//!
//! Characteristics are identified by 128-bit UUIDs. The Bluetooth SIG assigns
//! 16-bit and 32-bit aliases that expand over the Bluetooth Base UUID:
//!
//! ```text
//! 0000xxxx-0000-1000-8000-00805f9b34fb   (16-bit alias xxxx)
//! xxxxxxxx-0000-1000-8000-00805f9b34fb   (32-bit alias)
//! ```
//!
//! The canonical textual form is lower-case hex with hyphens after the
//! 8th, 12th, 16th and 20th digit. It is also the key of the override registry.

use crate::constants::BLUETOOTH_BASE_UUID;
use crate::error::{MarshalError, Result};
use core::fmt;

/// Length of the canonical textual form
const TEXT_LEN: usize = 36;

/// Positions of the hyphens in the canonical textual form
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Mask covering the alias bits of a SIG UUID
const ALIAS_MASK: u128 = 0xFFFF_FFFF << 96;

/// 128-bit characteristic UUID
///
/// # Examples
///
/// ```
/// use gatt_marshal::CharacteristicUuid;
///
/// // Battery Level, from its 16-bit alias
/// let battery = CharacteristicUuid::from_u16(0x2A19);
/// assert_eq!(battery.to_string(), "00002a19-0000-1000-8000-00805f9b34fb");
///
/// // Parse from text (either hex case)
/// let parsed: CharacteristicUuid = "00002A19-0000-1000-8000-00805F9B34FB".parse().unwrap();
/// assert_eq!(parsed, battery);
/// assert_eq!(parsed.as_u16(), Some(0x2A19));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharacteristicUuid {
    raw: u128,
}

impl CharacteristicUuid {
    /// Create from the 128-bit numeric value (most significant digit first).
    #[inline(always)]
    pub const fn from_u128(raw: u128) -> Self {
        Self { raw }
    }

    /// Expand a 16-bit SIG alias over the Bluetooth Base UUID.
    #[inline]
    pub const fn from_u16(alias: u16) -> Self {
        Self::from_u32(alias as u32)
    }

    /// Expand a 32-bit SIG alias over the Bluetooth Base UUID.
    #[inline]
    pub const fn from_u32(alias: u32) -> Self {
        Self {
            raw: ((alias as u128) << 96) | BLUETOOTH_BASE_UUID,
        }
    }

    /// Get the 128-bit numeric value.
    #[inline(always)]
    pub const fn as_u128(self) -> u128 {
        self.raw
    }

    /// Get the 16-bit alias if this is a SIG UUID in the 16-bit range.
    pub fn as_u16(self) -> Option<u16> {
        self.as_u32().and_then(|alias| u16::try_from(alias).ok())
    }

    /// Get the 32-bit alias if this is a SIG UUID.
    pub fn as_u32(self) -> Option<u32> {
        if self.raw & !ALIAS_MASK == BLUETOOTH_BASE_UUID {
            Some((self.raw >> 96) as u32)
        } else {
            None
        }
    }

    /// Decode the over-the-air form (little-endian, 2, 4 or 16 bytes).
    ///
    /// # Errors
    ///
    /// Returns a UUID error for any other length.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        match *bytes {
            [a, b] => Ok(Self::from_u16(u16::from_le_bytes([a, b]))),
            [a, b, c, d] => Ok(Self::from_u32(u32::from_le_bytes([a, b, c, d]))),
            _ => {
                let full: [u8; 16] = bytes.try_into().map_err(|_len| MarshalError::invalid_uuid())?;
                Ok(Self::from_u128(u128::from_le_bytes(full)))
            }
        }
    }

    /// Encode the full 128-bit over-the-air form (little-endian).
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.raw.to_le_bytes()
    }
}

impl From<u16> for CharacteristicUuid {
    #[inline]
    fn from(alias: u16) -> Self {
        Self::from_u16(alias)
    }
}

impl From<u128> for CharacteristicUuid {
    #[inline(always)]
    fn from(raw: u128) -> Self {
        Self { raw }
    }
}

impl From<CharacteristicUuid> for u128 {
    #[inline(always)]
    fn from(uuid: CharacteristicUuid) -> u128 {
        uuid.raw
    }
}

impl fmt::Display for CharacteristicUuid {
    /// Canonical lower-case textual form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.raw;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (r >> 96) as u32,
            (r >> 80) as u16,
            (r >> 64) as u16,
            (r >> 48) as u16,
            (r & 0xFFFF_FFFF_FFFF) as u64
        )
    }
}

impl core::str::FromStr for CharacteristicUuid {
    type Err = MarshalError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != TEXT_LEN {
            return Err(MarshalError::invalid_uuid());
        }

        let mut raw: u128 = 0;
        for (i, &c) in bytes.iter().enumerate() {
            if HYPHENS.contains(&i) {
                if c != b'-' {
                    return Err(MarshalError::invalid_uuid());
                }
                continue;
            }
            let nibble = hex_nibble(c).ok_or_else(MarshalError::invalid_uuid)?;
            raw = (raw << 4) | u128::from(nibble);
        }

        Ok(Self { raw })
    }
}

#[inline]
fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
