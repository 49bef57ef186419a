//! Format-table driven codec with decimal exponent scaling.
//!
//! ## Scaling
//!
//! The presentation format exponent relates the transmitted integer to the
//! real-world quantity:
//!
//! ```text
//! real = raw × 10^exponent
//! raw  = real × 10^(-exponent)
//! ```
//!
//! so a temperature of 21.37 °C sent as `sint16` with exponent -2 travels as
//! the integer 2137. Exponents apply to fixed-width formats only; text and
//! opaque formats ignore them.
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::codec::ScaledPackCodec;
//! use gatt_marshal::format::FormatCode;
//! use gatt_marshal::Value;
//!
//! let codec = ScaledPackCodec::new(FormatCode::Uint16.entry(), -2, 0);
//!
//! let bytes = codec.marshall(&Value::F64(10.0))?;
//! assert_eq!(bytes.as_slice(), &[0xE8, 0x03]);
//!
//! let value = codec.unmarshall(&[0xE8, 0x03])?;
//! assert_eq!(value, Value::F64(10.0));
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

use crate::codec::value::{payload_from, Payload, Text, Value};
use crate::error::{MarshalError, Result};
use crate::format::{FormatEntry, NativeKind, Unit};

/// Codec for a supported presentation format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaledPackCodec {
    entry: FormatEntry,
    exponent: i8,
    unit: u16,
}

impl ScaledPackCodec {
    /// Create a codec for a table entry.
    pub const fn new(entry: &FormatEntry, exponent: i8, unit: u16) -> Self {
        Self {
            entry: *entry,
            exponent,
            unit,
        }
    }

    /// Get the format table entry
    #[inline]
    pub const fn entry(&self) -> &FormatEntry {
        &self.entry
    }

    /// Get the decimal exponent
    #[inline]
    pub const fn exponent(&self) -> i8 {
        self.exponent
    }

    /// Get the unit (metadata only)
    #[inline]
    pub const fn unit(&self) -> Unit {
        Unit::new(self.unit)
    }

    /// Marshall a value to characteristic bytes.
    ///
    /// # Errors
    ///
    /// - Type mismatch if the value kind cannot be packed as this format
    /// - Out of range if the (scaled) value does not fit the native type
    /// - Payload too large for text longer than the attribute limit
    pub fn marshall(&self, value: &Value) -> Result<Payload> {
        let Some(width) = self.entry.byte_width else {
            return self.marshall_variable(value);
        };

        let number = Number::from_value(value)?.to_wire(self.exponent);
        let payload = pack(self.entry.native, number)?;

        assert_eq!(
            payload.len(),
            width,
            "packed width disagrees with format table"
        );
        Ok(payload)
    }

    /// Unmarshall characteristic bytes to a value.
    ///
    /// # Errors
    ///
    /// - Length mismatch if a fixed-width format receives any other length
    /// - Invalid UTF-8 for malformed `utf8s` values
    pub fn unmarshall(&self, data: &[u8]) -> Result<Value> {
        let Some(width) = self.entry.byte_width else {
            return self.unmarshall_variable(data);
        };

        if data.len() != width {
            return Err(MarshalError::length_mismatch());
        }

        let raw = unpack(self.entry.native, data)?;
        if self.exponent == 0 {
            return Ok(raw);
        }

        // Fixed-width values are always numeric
        let real = from_wire(raw.as_f64().ok_or_else(MarshalError::type_mismatch)?, self.exponent);
        Ok(Value::F64(real))
    }

    fn marshall_variable(&self, value: &Value) -> Result<Payload> {
        match (self.entry.native, value) {
            (NativeKind::Utf8, Value::Text(s)) => payload_from(s.as_bytes()),
            (NativeKind::Opaque, Value::Bytes(b)) => Ok(b.clone()),
            _ => Err(MarshalError::type_mismatch()),
        }
    }

    fn unmarshall_variable(&self, data: &[u8]) -> Result<Value> {
        match self.entry.native {
            NativeKind::Utf8 => {
                let text = core::str::from_utf8(data).map_err(|_invalid| MarshalError::invalid_utf8())?;
                let mut s = Text::new();
                s.push_str(text).map_err(|_full| MarshalError::payload_too_large())?;
                Ok(Value::Text(s))
            }
            _ => Ok(Value::Bytes(payload_from(data)?)),
        }
    }
}

// =============================================================================
// Numeric helpers
// =============================================================================

/// Numeric intermediate between a typed value and its packed form
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    /// Exact integer (covers the full u64 and i64 ranges)
    Int(i128),
    /// float32 kept as-is so its bits survive an unscaled round trip
    Single(f32),
    Float(f64),
}

impl Number {
    fn from_value(value: &Value) -> Result<Self> {
        let number = match *value {
            Value::Bool(b) => Number::Int(i128::from(b)),
            Value::U8(v) => Number::Int(i128::from(v)),
            Value::U16(v) => Number::Int(i128::from(v)),
            Value::U32(v) => Number::Int(i128::from(v)),
            Value::U64(v) => Number::Int(i128::from(v)),
            Value::I8(v) => Number::Int(i128::from(v)),
            Value::I16(v) => Number::Int(i128::from(v)),
            Value::I32(v) => Number::Int(i128::from(v)),
            Value::I64(v) => Number::Int(i128::from(v)),
            Value::F32(v) => Number::Single(v),
            Value::F64(v) => Number::Float(v),
            Value::Text(_) | Value::Bytes(_) => return Err(MarshalError::type_mismatch()),
        };
        Ok(number)
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Single(f) => f64::from(f),
            Number::Float(f) => f,
        }
    }

    /// Convert a real-world quantity to its transmitted form
    fn to_wire(self, exponent: i8) -> Self {
        match exponent {
            0 => self,
            e if e > 0 => Number::Float(self.as_f64() / pow10(e.unsigned_abs())),
            e => Number::Float(self.as_f64() * pow10(e.unsigned_abs())),
        }
    }

    /// Nearest integer, half away from zero
    fn to_integer(self) -> Result<i128> {
        match self {
            Number::Int(i) => Ok(i),
            other => round_half_away(other.as_f64()),
        }
    }
}

/// Manual rounding for no_std.
///
/// The cast truncates toward zero (saturating out-of-range values), the
/// remainder then decides the step. Floats of magnitude 2^52 and above have
/// no fractional part and convert unchanged.
fn round_half_away(f: f64) -> Result<i128> {
    if !f.is_finite() {
        return Err(MarshalError::value_out_of_range());
    }
    let truncated = f as i128;
    if !(-EXACT_INTEGER_LIMIT..=EXACT_INTEGER_LIMIT).contains(&f) {
        return Ok(truncated);
    }
    let remainder = f - truncated as f64;
    Ok(if remainder >= 0.5 {
        truncated + 1
    } else if remainder <= -0.5 {
        truncated - 1
    } else {
        truncated
    })
}

/// 2^52: every f64 at or beyond this magnitude is an integer
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Convert a transmitted quantity to its real-world value
fn from_wire(raw: f64, exponent: i8) -> f64 {
    match exponent {
        0 => raw,
        e if e > 0 => raw * pow10(e.unsigned_abs()),
        e => raw / pow10(e.unsigned_abs()),
    }
}

/// 10^n without libm
fn pow10(n: u8) -> f64 {
    let mut result = 1.0;
    for _ in 0..n {
        result *= 10.0;
    }
    result
}

fn integer<T: TryFrom<i128>>(number: Number) -> Result<T> {
    T::try_from(number.to_integer()?).map_err(|_overflow| MarshalError::value_out_of_range())
}

fn pack(native: NativeKind, number: Number) -> Result<Payload> {
    let mut buf = [0u8; 8];
    let len = match native {
        NativeKind::Bool => {
            buf[0] = u8::from(number.to_integer()? != 0);
            1
        }
        NativeKind::U8 => put(&mut buf, &integer::<u8>(number)?.to_le_bytes()),
        NativeKind::U16 => put(&mut buf, &integer::<u16>(number)?.to_le_bytes()),
        NativeKind::U32 => put(&mut buf, &integer::<u32>(number)?.to_le_bytes()),
        NativeKind::U64 => put(&mut buf, &integer::<u64>(number)?.to_le_bytes()),
        NativeKind::I8 => put(&mut buf, &integer::<i8>(number)?.to_le_bytes()),
        NativeKind::I16 => put(&mut buf, &integer::<i16>(number)?.to_le_bytes()),
        NativeKind::I32 => put(&mut buf, &integer::<i32>(number)?.to_le_bytes()),
        NativeKind::I64 => put(&mut buf, &integer::<i64>(number)?.to_le_bytes()),
        NativeKind::F32 => {
            if let Number::Single(f) = number {
                return payload_from(&f.to_le_bytes());
            }
            let f = number.as_f64();
            if f.is_finite() && !(f64::from(f32::MIN)..=f64::from(f32::MAX)).contains(&f) {
                return Err(MarshalError::value_out_of_range());
            }
            put(&mut buf, &(f as f32).to_le_bytes())
        }
        NativeKind::F64 => put(&mut buf, &number.as_f64().to_le_bytes()),
        NativeKind::Utf8 | NativeKind::Opaque => return Err(MarshalError::type_mismatch()),
    };
    payload_from(&buf[..len])
}

#[inline]
fn put(buf: &mut [u8; 8], bytes: &[u8]) -> usize {
    buf[..bytes.len()].copy_from_slice(bytes);
    bytes.len()
}

fn unpack(native: NativeKind, data: &[u8]) -> Result<Value> {
    let value = match native {
        NativeKind::Bool => Value::Bool(array::<1>(data)?[0] != 0),
        NativeKind::U8 => Value::U8(u8::from_le_bytes(array(data)?)),
        NativeKind::U16 => Value::U16(u16::from_le_bytes(array(data)?)),
        NativeKind::U32 => Value::U32(u32::from_le_bytes(array(data)?)),
        NativeKind::U64 => Value::U64(u64::from_le_bytes(array(data)?)),
        NativeKind::I8 => Value::I8(i8::from_le_bytes(array(data)?)),
        NativeKind::I16 => Value::I16(i16::from_le_bytes(array(data)?)),
        NativeKind::I32 => Value::I32(i32::from_le_bytes(array(data)?)),
        NativeKind::I64 => Value::I64(i64::from_le_bytes(array(data)?)),
        NativeKind::F32 => Value::F32(f32::from_le_bytes(array(data)?)),
        NativeKind::F64 => Value::F64(f64::from_le_bytes(array(data)?)),
        NativeKind::Utf8 | NativeKind::Opaque => return Err(MarshalError::type_mismatch()),
    };
    Ok(value)
}

#[inline]
fn array<const W: usize>(data: &[u8]) -> Result<[u8; W]> {
    data.try_into().map_err(|_len| MarshalError::length_mismatch())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{self, FormatCode};

    fn codec(code: FormatCode, exponent: i8) -> ScaledPackCodec {
        ScaledPackCodec::new(code.entry(), exponent, 0)
    }

    fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
        assert!(
            (a - b).abs() < epsilon,
            "Expected {} ≈ {}, diff = {}",
            a,
            b,
            (a - b).abs()
        );
    }

    #[test]
    fn test_unmarshall_uint16() {
        let value = codec(FormatCode::Uint16, 0).unmarshall(&[0xE8, 0x03]).unwrap();
        assert_eq!(value, Value::U16(1000));
    }

    #[test]
    fn test_unmarshall_uint16_negative_exponent() {
        let value = codec(FormatCode::Uint16, -2).unmarshall(&[0xE8, 0x03]).unwrap();
        assert_eq!(value, Value::F64(10.0));
    }

    #[test]
    fn test_marshall_uint16_negative_exponent() {
        let bytes = codec(FormatCode::Uint16, -2).marshall(&Value::F64(10.0)).unwrap();
        assert_eq!(bytes.as_slice(), &[0xE8, 0x03]);
    }

    #[test]
    fn test_positive_exponent() {
        // 1500 m sent as uint8 with exponent 2 -> 15
        let c = codec(FormatCode::Uint8, 2);
        assert_eq!(c.marshall(&Value::U16(1500)).unwrap().as_slice(), &[15]);
        assert_eq!(c.unmarshall(&[15]).unwrap(), Value::F64(1500.0));
    }

    #[test]
    fn test_negative_temperature() {
        // -12.34 °C as sint16, exponent -2
        let c = codec(FormatCode::Sint16, -2);
        let bytes = c.marshall(&Value::F64(-12.34)).unwrap();
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), -1234);

        let value = c.unmarshall(&bytes).unwrap();
        assert_float_eq(value.as_f64().unwrap(), -12.34, 1e-9);
    }

    #[test]
    fn test_marshall_rounds_to_nearest() {
        // 0.29 * 100 is 28.999999999999996 in f64
        let c = codec(FormatCode::Uint8, -2);
        assert_eq!(c.marshall(&Value::F64(0.29)).unwrap().as_slice(), &[29]);

        let c = codec(FormatCode::Sint8, 0);
        assert_eq!(c.marshall(&Value::F64(-2.5)).unwrap().as_slice(), &[(-3i8) as u8]);
    }

    /// Byte patterns that stress the round trip of a `width`-byte format
    fn edge_patterns(width: usize) -> Vec<Vec<u8>> {
        let mut patterns = vec![
            vec![0x00; width],
            vec![0xFF; width],
            (1..=width as u8).map(|i| 0x11 * i).collect(),
        ];

        // Sign bit only (most negative integer, -0.0) and its complement
        let mut sign = vec![0x00; width];
        sign[width - 1] = 0x80;
        patterns.push(sign);
        let mut max = vec![0xFF; width];
        max[width - 1] = 0x7F;
        patterns.push(max);

        match width {
            4 => {
                patterns.push(vec![0x01, 0x00, 0x80, 0x7F]); // sNaN
                patterns.push(vec![0x00, 0x00, 0xC0, 0x7F]); // qNaN
                patterns.push(vec![0x00, 0x00, 0x80, 0x7F]); // +inf
                patterns.push(vec![0x00, 0x00, 0x80, 0xFF]); // -inf
            }
            8 => {
                patterns.push(vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x7F]); // sNaN
                patterns.push(vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF8, 0x7F]); // qNaN
                patterns.push(vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0xFF]); // -inf
                patterns.push(vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00]); // 2^52 + 1 as u64
            }
            _ => {}
        }
        patterns
    }

    #[test]
    fn test_round_trip_unscaled_all_fixed_formats() {
        for entry in format::entries() {
            let Some(width) = entry.byte_width else {
                continue;
            };
            let c = ScaledPackCodec::new(entry, 0, 0);

            let patterns = if entry.native == NativeKind::Bool {
                // Only the canonical encodings survive
                vec![vec![0x00], vec![0x01]]
            } else {
                edge_patterns(width)
            };

            for bytes in patterns {
                let value = c.unmarshall(&bytes).unwrap();
                let packed = c.marshall(&value).unwrap();
                assert_eq!(packed.as_slice(), bytes.as_slice(), "format {:?}", entry.code);
            }
        }
    }

    #[test]
    fn test_float32_signalling_nan_preserved() {
        let c = codec(FormatCode::Float32, 0);
        let value = c.unmarshall(&[0x01, 0x00, 0x80, 0x7F]).unwrap();
        assert_eq!(c.marshall(&value).unwrap().as_slice(), &[0x01, 0x00, 0x80, 0x7F]);
    }

    #[test]
    fn test_large_float_packed_exactly() {
        // 2^52 + 1 has no fractional part and must not be bumped
        let c = codec(FormatCode::Uint64, 0);
        let bytes = c.marshall(&Value::F64(4_503_599_627_370_497.0)).unwrap();
        assert_eq!(u64::from_le_bytes(array(&bytes).unwrap()), 4_503_599_627_370_497);

        let c = codec(FormatCode::Sint64, 0);
        let bytes = c.marshall(&Value::F64(-9_007_199_254_740_993.0)).unwrap();
        assert_eq!(
            i64::from_le_bytes(array(&bytes).unwrap()),
            -9_007_199_254_740_992,
            "nearest f64 of the literal"
        );
    }

    #[test]
    fn test_just_below_half_rounds_down() {
        let c = codec(FormatCode::Uint8, 0);
        assert_eq!(c.marshall(&Value::F64(0.499_999_999_999_999_94)).unwrap().as_slice(), &[0]);
        assert_eq!(c.marshall(&Value::F64(0.5)).unwrap().as_slice(), &[1]);

        let c = codec(FormatCode::Sint8, 0);
        assert_eq!(
            c.marshall(&Value::F64(-0.499_999_999_999_999_94)).unwrap().as_slice(),
            &[0]
        );
        assert_eq!(c.marshall(&Value::F64(-1.5)).unwrap().as_slice(), &[(-2i8) as u8]);
    }

    #[test]
    fn test_length_mismatch() {
        for entry in format::entries() {
            let Some(width) = entry.byte_width else {
                continue;
            };
            let c = ScaledPackCodec::new(entry, 0, 0);
            let data = [0u8; 9];

            let short = c.unmarshall(&data[..width - 1]);
            assert!(matches!(short, Err(ref e) if e.is_length_mismatch()));

            let long = c.unmarshall(&data[..width + 1]);
            assert!(matches!(long, Err(ref e) if e.is_length_mismatch()));
        }
    }

    #[test]
    fn test_out_of_range() {
        let c = codec(FormatCode::Uint16, 0);
        assert!(matches!(
            c.marshall(&Value::U32(70_000)),
            Err(MarshalError::Value(ref e)) if e.is_out_of_range()
        ));
        assert!(c.marshall(&Value::I8(-1)).is_err());

        // Scaling pushes the value out of range
        let c = codec(FormatCode::Uint8, -2);
        assert!(c.marshall(&Value::F64(2.56)).is_err());
        assert!(c.marshall(&Value::F64(2.55)).is_ok());

        let c = codec(FormatCode::Uint32, 0);
        assert!(c.marshall(&Value::F64(f64::NAN)).is_err());

        let c = codec(FormatCode::Float32, 0);
        assert!(c.marshall(&Value::F64(1e40)).is_err());
    }

    #[test]
    fn test_full_width_integers_exact() {
        let c = codec(FormatCode::Uint64, 0);
        let bytes = c.marshall(&Value::U64(u64::MAX)).unwrap();
        assert_eq!(bytes.as_slice(), &[0xFF; 8]);

        let c = codec(FormatCode::Sint64, 0);
        let bytes = c.marshall(&Value::I64(i64::MIN)).unwrap();
        assert_eq!(c.unmarshall(&bytes).unwrap(), Value::I64(i64::MIN));
    }

    #[test]
    fn test_boolean() {
        let c = codec(FormatCode::Boolean, 0);
        assert_eq!(c.marshall(&Value::Bool(true)).unwrap().as_slice(), &[0x01]);
        assert_eq!(c.marshall(&Value::Bool(false)).unwrap().as_slice(), &[0x00]);
        assert_eq!(c.unmarshall(&[0x00]).unwrap(), Value::Bool(false));
        assert_eq!(c.unmarshall(&[0x02]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_floats() {
        let c = codec(FormatCode::Float32, 0);
        let bytes = c.marshall(&Value::F32(21.5)).unwrap();
        assert_eq!(bytes.as_slice(), &21.5f32.to_le_bytes());
        assert_eq!(c.unmarshall(&bytes).unwrap(), Value::F32(21.5));

        let c = codec(FormatCode::Float64, 1);
        let bytes = c.marshall(&Value::F64(1234.0)).unwrap();
        assert_eq!(bytes.as_slice(), &123.4f64.to_le_bytes());
        assert_float_eq(c.unmarshall(&bytes).unwrap().as_f64().unwrap(), 1234.0, 1e-9);
    }

    #[test]
    fn test_utf8_ignores_exponent_and_width() {
        let c = codec(FormatCode::Utf8String, -3);
        let value = Value::text("Zephyr Thermo ✓").unwrap();
        let bytes = c.marshall(&value).unwrap();
        assert_eq!(bytes.as_slice(), "Zephyr Thermo ✓".as_bytes());
        assert_eq!(c.unmarshall(&bytes).unwrap(), value);

        assert_eq!(c.unmarshall(&[]).unwrap(), Value::text("").unwrap());
    }

    #[test]
    fn test_utf8_invalid() {
        let c = codec(FormatCode::Utf8String, 0);
        let result = c.unmarshall(&[0xC3, 0x28]);
        assert!(matches!(result, Err(MarshalError::Value(ref e)) if e.is_invalid_utf8()));
    }

    #[test]
    fn test_opaque_identity() {
        let c = codec(FormatCode::Opaque, 4);
        let data = [0xDE, 0xAD, 0xBE, 0xEF, 0x00];
        let value = c.unmarshall(&data).unwrap();
        assert_eq!(value.as_bytes(), Some(&data[..]));
        assert_eq!(c.marshall(&value).unwrap().as_slice(), &data);
    }

    #[test]
    fn test_type_mismatch() {
        let c = codec(FormatCode::Uint16, 0);
        let result = c.marshall(&Value::text("12").unwrap());
        assert!(matches!(result, Err(MarshalError::Value(ref e)) if e.is_type_mismatch()));

        let c = codec(FormatCode::Utf8String, 0);
        assert!(c.marshall(&Value::U8(1)).is_err());
        assert!(c.marshall(&Value::bytes(b"raw").unwrap()).is_err());

        let c = codec(FormatCode::Opaque, 0);
        assert!(c.marshall(&Value::text("raw").unwrap()).is_err());
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), 1.0);
        assert_eq!(pow10(3), 1000.0);
        assert_eq!(from_wire(1000.0, -2), 10.0);
        assert_eq!(from_wire(5.0, 3), 5000.0);
    }
}
