//! Characteristic Presentation Format descriptor (0x2904) parsing.
//!
//! ## Layout
//!
//! ```text
//! ┌────────┬──────────┬───────────┬───────────┬─────────────┐
//! │ Format │ Exponent │   Unit    │ Namespace │ Description │
//! │  u8    │   i8     │ u16 (LE)  │    u8     │  u16 (LE)   │
//! └────────┴──────────┴───────────┴───────────┴─────────────┘
//!    0         1         2..4         4           5..7
//! ```
//!
//! The layout is fixed by the Core Specification (Vol 3, Part G, 3.3.3.5)
//! and the value is always exactly 7 bytes.
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::format::PresentationFormat;
//!
//! // uint16, exponent -2, unit degree Celsius
//! let pf = PresentationFormat::parse(&[0x06, 0xFE, 0x2F, 0x27, 0x01, 0x00, 0x00])?;
//! assert_eq!(pf.format, 0x06);
//! assert_eq!(pf.exponent, -2);
//! assert_eq!(pf.unit, 0x272F);
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::constants::{NAMESPACE_BLUETOOTH_SIG, PRESENTATION_FORMAT_LEN};
use crate::error::{MarshalError, Result};
use crate::format::{FormatCode, FormatEntry, Unit};

/// Parsed 0x2904 descriptor value
///
/// `format` is kept as the raw byte so descriptors with unsupported formats
/// still parse; [`format_code`](Self::format_code) reports whether the
/// format is in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentationFormat {
    /// Raw format code
    pub format: u8,
    /// Decimal exponent: real value = raw value × 10^exponent
    pub exponent: i8,
    /// Unit, a SIG assigned UUID alias (opaque)
    pub unit: u16,
    /// Namespace of `description`
    pub namespace: u8,
    /// Description, interpreted in `namespace`
    pub description: u16,
}

impl PresentationFormat {
    /// Size of the descriptor value in bytes
    pub const SIZE: usize = PRESENTATION_FORMAT_LEN;

    /// Create a descriptor for a supported format in the SIG namespace.
    pub const fn new(code: FormatCode, exponent: i8, unit: u16) -> Self {
        Self {
            format: code.to_u8(),
            exponent,
            unit,
            namespace: NAMESPACE_BLUETOOTH_SIG,
            description: 0,
        }
    }

    /// Parse a descriptor value.
    ///
    /// # Errors
    ///
    /// Returns a descriptor error unless `data` is exactly 7 bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let &[format, exponent, unit_lo, unit_hi, namespace, desc_lo, desc_hi] = data else {
            return Err(MarshalError::invalid_descriptor_length());
        };

        Ok(Self {
            format,
            exponent: i8::from_le_bytes([exponent]),
            unit: u16::from_le_bytes([unit_lo, unit_hi]),
            namespace,
            description: u16::from_le_bytes([desc_lo, desc_hi]),
        })
    }

    /// Encode the descriptor value.
    pub fn to_bytes(&self) -> [u8; PRESENTATION_FORMAT_LEN] {
        let unit = self.unit.to_le_bytes();
        let description = self.description.to_le_bytes();
        [
            self.format,
            self.exponent.to_le_bytes()[0],
            unit[0],
            unit[1],
            self.namespace,
            description[0],
            description[1],
        ]
    }

    /// Get the format code if it is supported
    #[inline]
    pub const fn format_code(&self) -> Option<FormatCode> {
        FormatCode::from_u8(self.format)
    }

    /// Get the format table entry if the format is supported
    #[inline]
    pub fn entry(&self) -> Option<&'static FormatEntry> {
        self.format_code().map(FormatCode::entry)
    }

    /// Get the unit as a typed alias
    #[inline]
    pub const fn unit(&self) -> Unit {
        Unit::new(self.unit)
    }
}
