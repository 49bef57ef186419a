//! Typed characteristic values.

use crate::constants::MAX_VALUE_LEN;
use crate::error::{MarshalError, Result};

/// Raw characteristic value bytes
pub type Payload = heapless::Vec<u8, MAX_VALUE_LEN>;

/// UTF-8 characteristic value text
pub type Text = heapless::String<MAX_VALUE_LEN>;

/// Typed characteristic value
///
/// Scaled numeric formats (non-zero exponent) always unmarshall to [`Value::F64`].
///
/// # Examples
///
/// ```
/// use gatt_marshal::Value;
///
/// let level = Value::from(87u8);
/// assert_eq!(level.as_u64(), Some(87));
///
/// let name = Value::text("Thermometer").unwrap();
/// assert_eq!(name.as_str(), Some("Thermometer"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// boolean
    Bool(bool),
    /// uint2, uint4, uint8
    U8(u8),
    /// uint12, uint16
    U16(u16),
    /// uint32
    U32(u32),
    /// uint64
    U64(u64),
    /// sint8
    I8(i8),
    /// sint12, sint16
    I16(i16),
    /// sint32
    I32(i32),
    /// sint64
    I64(i64),
    /// float32
    F32(f32),
    /// float64, or any scaled numeric format
    F64(f64),
    /// utf8s
    Text(Text),
    /// struct, or a characteristic without a usable presentation format
    Bytes(Payload),
}

impl Value {
    /// Create a text value.
    ///
    /// # Errors
    ///
    /// Returns a payload-too-large error if `s` exceeds the attribute size limit.
    pub fn text(s: &str) -> Result<Self> {
        let mut text = Text::new();
        text.push_str(s).map_err(|_full| MarshalError::payload_too_large())?;
        Ok(Value::Text(text))
    }

    /// Create an opaque byte value.
    ///
    /// # Errors
    ///
    /// Returns a payload-too-large error if `data` exceeds the attribute size limit.
    pub fn bytes(data: &[u8]) -> Result<Self> {
        Ok(Value::Bytes(payload_from(data)?))
    }

    /// Get the value as a boolean (booleans only)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get a non-negative integer value widened to u64
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(u64::from(v)),
            Value::U16(v) => Some(u64::from(v)),
            Value::U32(v) => Some(u64::from(v)),
            Value::U64(v) => Some(v),
            Value::I8(v) => u64::try_from(v).ok(),
            Value::I16(v) => u64::try_from(v).ok(),
            Value::I32(v) => u64::try_from(v).ok(),
            Value::I64(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Get an integer value widened to i64
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::U8(v) => Some(i64::from(v)),
            Value::U16(v) => Some(i64::from(v)),
            Value::U32(v) => Some(i64::from(v)),
            Value::U64(v) => i64::try_from(v).ok(),
            Value::I8(v) => Some(i64::from(v)),
            Value::I16(v) => Some(i64::from(v)),
            Value::I32(v) => Some(i64::from(v)),
            Value::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Get any numeric value as f64
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Value::U8(v) => Some(f64::from(v)),
            Value::U16(v) => Some(f64::from(v)),
            Value::U32(v) => Some(f64::from(v)),
            Value::U64(v) => Some(v as f64),
            Value::I8(v) => Some(f64::from(v)),
            Value::I16(v) => Some(f64::from(v)),
            Value::I32(v) => Some(f64::from(v)),
            Value::I64(v) => Some(v as f64),
            Value::F32(v) => Some(f64::from(v)),
            Value::F64(v) => Some(v),
            Value::Text(_) | Value::Bytes(_) => None,
        }
    }

    /// Get the text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the bytes of an opaque value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Check if this is a numeric (or boolean) value
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Value::Text(_) | Value::Bytes(_))
    }
}

/// Copy `data` into a bounded payload
pub(crate) fn payload_from(data: &[u8]) -> Result<Payload> {
    Payload::from_slice(data).map_err(|_full| MarshalError::payload_too_large())
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from!(
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Text => Text,
    Payload => Bytes,
);
