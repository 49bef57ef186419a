//! Characteristic Presentation Format types
//!
//! This module maps the 1-byte format code of the 0x2904 descriptor to the
//! wire encoding of the characteristic value.
//!
//! ## Supported Formats
//!
//! | Code | Name    | Native | Width    |
//! |------|---------|--------|----------|
//! | 0x01 | boolean | bool   | 1        |
//! | 0x02 | uint2   | u8     | 1        |
//! | 0x03 | uint4   | u8     | 1        |
//! | 0x04 | uint8   | u8     | 1        |
//! | 0x05 | uint12  | u16    | 2        |
//! | 0x06 | uint16  | u16    | 2        |
//! | 0x08 | uint32  | u32    | 4        |
//! | 0x0A | uint64  | u64    | 8        |
//! | 0x0C | sint8   | i8     | 1        |
//! | 0x0D | sint12  | i16    | 2        |
//! | 0x0E | sint16  | i16    | 2        |
//! | 0x10 | sint32  | i32    | 4        |
//! | 0x12 | sint64  | i64    | 8        |
//! | 0x14 | float32 | f32    | 4        |
//! | 0x15 | float64 | f64    | 8        |
//! | 0x19 | utf8s   | text   | variable |
//! | 0x1B | struct  | bytes  | variable |
//!
//! All fixed-width values are little-endian.
//!
//! The 24, 48 and 128-bit integer formats (0x07, 0x09, 0x0B, 0x0F, 0x11, 0x13)
//! have no native Rust integer of matching width and are not in the table,
//! nor are the IEEE-11073 and UTF-16 formats. Characteristics using them are
//! handled as raw bytes by the identity codec.
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::format::{self, FormatCode, NativeKind};
//!
//! let entry = format::lookup(0x06).unwrap();
//! assert_eq!(entry.code, FormatCode::Uint16);
//! assert_eq!(entry.native, NativeKind::U16);
//! assert_eq!(entry.byte_width, Some(2));
//!
//! // 24-bit integers are reserved
//! assert!(format::lookup(0x07).is_none());
//! ```

pub mod descriptor;
pub mod unit;

#[doc(inline)]
pub use descriptor::PresentationFormat;
#[doc(inline)]
pub use unit::Unit;

/// Presentation format codes with a native encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FormatCode {
    /// unsigned 1-bit; 0 = false, 1 = true
    Boolean = 0x01,
    /// unsigned 2-bit integer
    Uint2 = 0x02,
    /// unsigned 4-bit integer
    Uint4 = 0x03,
    /// unsigned 8-bit integer
    Uint8 = 0x04,
    /// unsigned 12-bit integer
    Uint12 = 0x05,
    /// unsigned 16-bit integer
    Uint16 = 0x06,
    /// unsigned 32-bit integer
    Uint32 = 0x08,
    /// unsigned 64-bit integer
    Uint64 = 0x0A,
    /// signed 8-bit integer
    Sint8 = 0x0C,
    /// signed 12-bit integer
    Sint12 = 0x0D,
    /// signed 16-bit integer
    Sint16 = 0x0E,
    /// signed 32-bit integer
    Sint32 = 0x10,
    /// signed 64-bit integer
    Sint64 = 0x12,
    /// IEEE-754 32-bit floating point
    Float32 = 0x14,
    /// IEEE-754 64-bit floating point
    Float64 = 0x15,
    /// UTF-8 string
    Utf8String = 0x19,
    /// Opaque structure
    Opaque = 0x1B,
}

impl FormatCode {
    /// Convert a raw format byte to a supported code.
    ///
    /// Returns `None` for reserved or unsupported codes.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Boolean),
            0x02 => Some(Self::Uint2),
            0x03 => Some(Self::Uint4),
            0x04 => Some(Self::Uint8),
            0x05 => Some(Self::Uint12),
            0x06 => Some(Self::Uint16),
            0x08 => Some(Self::Uint32),
            0x0A => Some(Self::Uint64),
            0x0C => Some(Self::Sint8),
            0x0D => Some(Self::Sint12),
            0x0E => Some(Self::Sint16),
            0x10 => Some(Self::Sint32),
            0x12 => Some(Self::Sint64),
            0x14 => Some(Self::Float32),
            0x15 => Some(Self::Float64),
            0x19 => Some(Self::Utf8String),
            0x1B => Some(Self::Opaque),
            _ => None,
        }
    }

    /// Get the raw format byte
    #[inline(always)]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Get the short name used by the Bluetooth SIG format types table
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Uint2 => "uint2",
            Self::Uint4 => "uint4",
            Self::Uint8 => "uint8",
            Self::Uint12 => "uint12",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint8 => "sint8",
            Self::Sint12 => "sint12",
            Self::Sint16 => "sint16",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Utf8String => "utf8s",
            Self::Opaque => "struct",
        }
    }

    /// Get the table entry for this code
    pub fn entry(self) -> &'static FormatEntry {
        // Table is indexed in declaration order of the enum
        &FORMAT_TABLE[self.index()]
    }

    const fn index(self) -> usize {
        match self {
            Self::Boolean => 0,
            Self::Uint2 => 1,
            Self::Uint4 => 2,
            Self::Uint8 => 3,
            Self::Uint12 => 4,
            Self::Uint16 => 5,
            Self::Uint32 => 6,
            Self::Uint64 => 7,
            Self::Sint8 => 8,
            Self::Sint12 => 9,
            Self::Sint16 => 10,
            Self::Sint32 => 11,
            Self::Sint64 => 12,
            Self::Float32 => 13,
            Self::Float64 => 14,
            Self::Utf8String => 15,
            Self::Opaque => 16,
        }
    }
}

/// Native element type a format is packed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NativeKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Variable-length UTF-8 text
    Utf8,
    /// Variable-length opaque bytes
    Opaque,
}

impl NativeKind {
    /// Size of one packed element, `None` for variable-length kinds
    pub const fn size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::U8 | Self::I8 => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 | Self::F32 => Some(4),
            Self::U64 | Self::I64 | Self::F64 => Some(8),
            Self::Utf8 | Self::Opaque => None,
        }
    }

    /// Check if this kind is a fixed-width scalar
    #[inline]
    pub const fn is_fixed(self) -> bool {
        self.size().is_some()
    }

    /// Check if this kind is an IEEE-754 float
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Immutable wire description of a format code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatEntry {
    /// Format code this entry describes
    pub code: FormatCode,
    /// Element type the value is packed as (always little-endian)
    pub native: NativeKind,
    /// Fixed packed width in bytes, `None` for variable-length formats
    pub byte_width: Option<usize>,
}

impl FormatEntry {
    const fn new(code: FormatCode, native: NativeKind) -> Self {
        Self {
            code,
            native,
            byte_width: native.size(),
        }
    }
}

/// The authoritative format table
static FORMAT_TABLE: [FormatEntry; 17] = [
    FormatEntry::new(FormatCode::Boolean, NativeKind::Bool),
    FormatEntry::new(FormatCode::Uint2, NativeKind::U8),
    FormatEntry::new(FormatCode::Uint4, NativeKind::U8),
    FormatEntry::new(FormatCode::Uint8, NativeKind::U8),
    FormatEntry::new(FormatCode::Uint12, NativeKind::U16),
    FormatEntry::new(FormatCode::Uint16, NativeKind::U16),
    FormatEntry::new(FormatCode::Uint32, NativeKind::U32),
    FormatEntry::new(FormatCode::Uint64, NativeKind::U64),
    FormatEntry::new(FormatCode::Sint8, NativeKind::I8),
    FormatEntry::new(FormatCode::Sint12, NativeKind::I16),
    FormatEntry::new(FormatCode::Sint16, NativeKind::I16),
    FormatEntry::new(FormatCode::Sint32, NativeKind::I32),
    FormatEntry::new(FormatCode::Sint64, NativeKind::I64),
    FormatEntry::new(FormatCode::Float32, NativeKind::F32),
    FormatEntry::new(FormatCode::Float64, NativeKind::F64),
    FormatEntry::new(FormatCode::Utf8String, NativeKind::Utf8),
    FormatEntry::new(FormatCode::Opaque, NativeKind::Opaque),
];

/// Look up the table entry for a raw format byte.
///
/// Returns `None` for reserved and unsupported codes; callers fall back to
/// treating the value as raw bytes.
#[inline]
pub fn lookup(code: u8) -> Option<&'static FormatEntry> {
    FormatCode::from_u8(code).map(FormatCode::entry)
}

/// Iterate over every supported table entry
pub fn entries() -> impl Iterator<Item = &'static FormatEntry> {
    FORMAT_TABLE.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: [u8; 17] = [1, 2, 3, 4, 5, 6, 8, 10, 12, 13, 14, 16, 18, 20, 21, 25, 27];

    #[test]
    fn test_lookup_supported() {
        for code in SUPPORTED {
            let entry = lookup(code).unwrap();
            assert_eq!(entry.code.to_u8(), code);
        }
    }

    #[test]
    fn test_lookup_reserved_wide_integers() {
        for code in [7, 9, 11, 15, 17, 19] {
            assert!(lookup(code).is_none(), "code {} should be unsupported", code);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup(0x00).is_none());
        assert!(lookup(0x16).is_none()); // IEEE-11073 SFLOAT
        assert!(lookup(0x1A).is_none()); // UTF-16 string
        assert!(lookup(99).is_none());
        assert!(lookup(0xFF).is_none());
    }

    #[test]
    fn test_table_indexing_matches_codes() {
        for entry in entries() {
            assert_eq!(entry.code.entry(), entry);
            assert_eq!(FormatCode::from_u8(entry.code.to_u8()), Some(entry.code));
        }
        assert_eq!(entries().count(), SUPPORTED.len());
    }

    #[test]
    fn test_width_present_iff_fixed() {
        for entry in entries() {
            match entry.native {
                NativeKind::Utf8 | NativeKind::Opaque => assert_eq!(entry.byte_width, None),
                _ => assert_eq!(entry.byte_width, entry.native.size()),
            }
            assert_eq!(entry.byte_width.is_some(), entry.native.is_fixed());
        }
    }

    #[test]
    fn test_widths() {
        assert_eq!(FormatCode::Boolean.entry().byte_width, Some(1));
        assert_eq!(FormatCode::Uint12.entry().byte_width, Some(2));
        assert_eq!(FormatCode::Uint64.entry().byte_width, Some(8));
        assert_eq!(FormatCode::Sint12.entry().native, NativeKind::I16);
        assert_eq!(FormatCode::Sint64.entry().native, NativeKind::I64);
        assert_eq!(FormatCode::Float32.entry().byte_width, Some(4));
    }

    #[test]
    fn test_names() {
        assert_eq!(FormatCode::Uint16.name(), "uint16");
        assert_eq!(FormatCode::Utf8String.name(), "utf8s");
        assert_eq!(FormatCode::Opaque.name(), "struct");
    }
}
