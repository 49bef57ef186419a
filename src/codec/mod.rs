//! Characteristic value codecs
//!
//! A [`Codec`] converts between the raw bytes of one characteristic and a
//! typed [`Value`]. There are exactly two strategies:
//!
//! - **Identity** - bytes pass through unchanged. Used when nothing is known
//!   about the encoding (no 0x2904 descriptor, or an unsupported format code).
//! - **ScaledPack** - a supported presentation format with its exponent,
//!   see [`ScaledPackCodec`].
//!
//! Codecs are `Copy`, hold no reference to the characteristic and can be
//! cached and shared freely.
//!
//! ## Usage
//!
//! ```rust
//! use gatt_marshal::{Codec, Value};
//! use gatt_marshal::format::FormatCode;
//!
//! // Battery level: uint8, percentage
//! let codec = Codec::for_format(FormatCode::Uint8.to_u8(), 0, 0x27AD).unwrap();
//! assert_eq!(codec.unmarshall(&[87])?, Value::U8(87));
//!
//! // Unknown encoding: raw bytes
//! let raw = Codec::Identity;
//! assert_eq!(raw.unmarshall(&[1, 2])?, Value::bytes(&[1, 2])?);
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::error::{MarshalError, Result};
use crate::format::{self, PresentationFormat};

pub mod scaled;
pub mod value;

#[doc(inline)]
pub use scaled::ScaledPackCodec;
#[doc(inline)]
pub use value::{Payload, Text, Value};

use value::payload_from;

/// Characteristic value codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Codec {
    /// Pass-through: values are raw bytes
    #[default]
    Identity,
    /// Presentation-format driven packing with exponent scaling
    ScaledPack(ScaledPackCodec),
}

impl Codec {
    /// Create a codec for a raw format code.
    ///
    /// Returns `None` if the format is not in the table.
    pub fn for_format(code: u8, exponent: i8, unit: u16) -> Option<Self> {
        format::lookup(code).map(|entry| Codec::ScaledPack(ScaledPackCodec::new(entry, exponent, unit)))
    }

    /// Create a codec from a parsed presentation format descriptor.
    ///
    /// Unsupported formats yield [`Codec::Identity`].
    pub fn from_presentation_format(pf: &PresentationFormat) -> Self {
        Self::for_format(pf.format, pf.exponent, pf.unit).unwrap_or(Codec::Identity)
    }

    /// Check if this is the pass-through codec
    #[inline]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Codec::Identity)
    }

    /// Marshall a typed value to characteristic bytes.
    ///
    /// The identity codec accepts [`Value::Bytes`] and [`Value::Text`] (its
    /// UTF-8 bytes); numeric values have no defined encoding there.
    ///
    /// # Errors
    ///
    /// See [`ScaledPackCodec::marshall`]; the identity codec returns a type
    /// mismatch for numeric values.
    #[inline]
    pub fn marshall(&self, value: &Value) -> Result<Payload> {
        match self {
            Codec::Identity => match value {
                Value::Bytes(b) => Ok(b.clone()),
                Value::Text(s) => payload_from(s.as_bytes()),
                _ => Err(MarshalError::type_mismatch()),
            },
            Codec::ScaledPack(codec) => codec.marshall(value),
        }
    }

    /// Unmarshall characteristic bytes to a typed value.
    ///
    /// # Errors
    ///
    /// See [`ScaledPackCodec::unmarshall`]. The identity codec only fails for
    /// input longer than the maximum attribute value.
    #[inline]
    pub fn unmarshall(&self, data: &[u8]) -> Result<Value> {
        match self {
            Codec::Identity => Ok(Value::Bytes(payload_from(data)?)),
            Codec::ScaledPack(codec) => codec.unmarshall(data),
        }
    }
}

impl From<ScaledPackCodec> for Codec {
    #[inline]
    fn from(codec: ScaledPackCodec) -> Self {
        Codec::ScaledPack(codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatCode;

    #[test]
    fn test_identity_pass_through() {
        let data = [0x00, 0xFF, 0x10, 0x20];
        let value = Codec::Identity.unmarshall(&data).unwrap();
        assert_eq!(value.as_bytes(), Some(&data[..]));
        assert_eq!(Codec::Identity.marshall(&value).unwrap().as_slice(), &data);
    }

    #[test]
    fn test_identity_empty() {
        let value = Codec::Identity.unmarshall(&[]).unwrap();
        assert_eq!(value.as_bytes(), Some(&[][..]));
    }

    #[test]
    fn test_identity_text() {
        let bytes = Codec::Identity.marshall(&Value::text("on").unwrap()).unwrap();
        assert_eq!(bytes.as_slice(), b"on");
    }

    #[test]
    fn test_identity_rejects_numbers() {
        assert!(Codec::Identity.marshall(&Value::U8(1)).is_err());
    }

    #[test]
    fn test_for_format() {
        let codec = Codec::for_format(0x0E, -2, 0x272F).unwrap();
        match codec {
            Codec::ScaledPack(c) => {
                assert_eq!(c.entry().code, FormatCode::Sint16);
                assert_eq!(c.exponent(), -2);
                assert_eq!(c.unit().raw(), 0x272F);
            }
            Codec::Identity => panic!("expected scaled codec"),
        }

        assert!(Codec::for_format(0x07, 0, 0).is_none());
    }

    #[test]
    fn test_from_presentation_format() {
        let pf = PresentationFormat::parse(&[99, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(Codec::from_presentation_format(&pf).is_identity());

        let pf = PresentationFormat::new(FormatCode::Uint16, 0, 0);
        let codec = Codec::from_presentation_format(&pf);
        assert_eq!(codec.unmarshall(&[0xE8, 0x03]).unwrap(), Value::U16(1000));
    }

    #[test]
    fn test_default_is_identity() {
        assert!(Codec::default().is_identity());
    }
}
