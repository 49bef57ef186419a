//! Error types for GATT marshalling following M-ERRORS-CANONICAL-STRUCTS guideline.
//!
//! This module provides structured error types with backtraces (when std is enabled)
//! and helper methods for error information.
//!
//! An unsupported presentation format code is *not* an error: the format table
//! answers `None` and the resolver falls back to the identity codec.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for marshalling operations.
pub type Result<T> = core::result::Result<T, MarshalError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Descriptor error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum DescriptorErrorKind {
    InvalidLength,
}

/// Value error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ValueErrorKind {
    LengthMismatch,
    TypeMismatch,
    OutOfRange,
    InvalidUtf8,
    PayloadTooLarge,
}

/// UUID error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum UuidErrorKind {
    InvalidFormat,
}

/// Registry error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum RegistryErrorKind {
    Full,
    AlreadyRegistered,
}

/// GATT client error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ClientErrorKind {
    ReadFailed,
    WriteFailed,
    Disconnected,
    Timeout,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// GATT marshalling error types.
///
/// This is the main error type returned by all operations of the crate.
/// It contains a backtrace (when std feature is enabled) and detailed
/// error information through helper methods.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarshalError {
    /// Malformed 0x2904 presentation format descriptor
    Descriptor(DescriptorError),
    /// Characteristic value could not be marshalled or unmarshalled
    Value(ValueError),
    /// Malformed characteristic UUID
    Uuid(UuidError),
    /// UUID override registry errors
    Registry(RegistryError),
    /// Errors reported by the GATT client collaborator
    Client(ClientError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Descriptor error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DescriptorError {
    kind: DescriptorErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl DescriptorError {
    pub(crate) fn new(kind: DescriptorErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the descriptor had the wrong byte length
    pub fn is_invalid_length(&self) -> bool {
        matches!(self.kind, DescriptorErrorKind::InvalidLength)
    }
}

/// Value error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueError {
    kind: ValueErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ValueError {
    pub(crate) fn new(kind: ValueErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the value bytes disagree with the format's fixed width
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self.kind, ValueErrorKind::LengthMismatch)
    }

    /// Check if the value kind does not match the codec
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ValueErrorKind::TypeMismatch)
    }

    /// Check if the value does not fit the native type
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ValueErrorKind::OutOfRange)
    }

    /// Check if a UTF-8 string value held invalid bytes
    pub fn is_invalid_utf8(&self) -> bool {
        matches!(self.kind, ValueErrorKind::InvalidUtf8)
    }

    /// Check if the value exceeds the maximum attribute length
    pub fn is_payload_too_large(&self) -> bool {
        matches!(self.kind, ValueErrorKind::PayloadTooLarge)
    }
}

/// UUID error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UuidError {
    kind: UuidErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl UuidError {
    pub(crate) fn new(kind: UuidErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the UUID text was not in canonical form
    pub fn is_invalid_format(&self) -> bool {
        matches!(self.kind, UuidErrorKind::InvalidFormat)
    }
}

/// Registry error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegistryError {
    kind: RegistryErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl RegistryError {
    pub(crate) fn new(kind: RegistryErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the registry has no free slots
    pub fn is_full(&self) -> bool {
        matches!(self.kind, RegistryErrorKind::Full)
    }

    /// Check if the UUID already had an override
    pub fn is_already_registered(&self) -> bool {
        matches!(self.kind, RegistryErrorKind::AlreadyRegistered)
    }
}

/// GATT client error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClientError {
    kind: ClientErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ClientError {
    pub(crate) fn new(kind: ClientErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the peer disconnected
    pub fn is_disconnected(&self) -> bool {
        matches!(self.kind, ClientErrorKind::Disconnected)
    }

    /// Check if the operation timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ClientErrorKind::Timeout)
    }

    /// Check if an attribute read failed
    pub fn is_read_failed(&self) -> bool {
        matches!(self.kind, ClientErrorKind::ReadFailed)
    }

    /// Check if an attribute write failed
    pub fn is_write_failed(&self) -> bool {
        matches!(self.kind, ClientErrorKind::WriteFailed)
    }
}

// =============================================================================
// Convenience Constructors for MarshalError
// =============================================================================

impl MarshalError {
    // Descriptor errors
    #[inline]
    pub(crate) fn invalid_descriptor_length() -> Self {
        Self::Descriptor(DescriptorError::new(DescriptorErrorKind::InvalidLength))
    }

    // Value errors
    pub(crate) fn length_mismatch() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::LengthMismatch))
    }

    pub(crate) fn type_mismatch() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::TypeMismatch))
    }

    pub(crate) fn value_out_of_range() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::OutOfRange))
    }

    pub(crate) fn invalid_utf8() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::InvalidUtf8))
    }

    pub(crate) fn payload_too_large() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::PayloadTooLarge))
    }

    // UUID errors
    pub(crate) fn invalid_uuid() -> Self {
        Self::Uuid(UuidError::new(UuidErrorKind::InvalidFormat))
    }

    // Registry errors
    pub(crate) fn registry_full() -> Self {
        Self::Registry(RegistryError::new(RegistryErrorKind::Full))
    }

    pub(crate) fn already_registered() -> Self {
        Self::Registry(RegistryError::new(RegistryErrorKind::AlreadyRegistered))
    }

    // Client errors
    /// Attribute read failed. Used by [`GattClient`](crate::gatt::GattClient) implementations.
    pub fn read_failed() -> Self {
        Self::Client(ClientError::new(ClientErrorKind::ReadFailed))
    }

    /// Attribute write failed. Used by [`GattClient`](crate::gatt::GattClient) implementations.
    pub fn write_failed() -> Self {
        Self::Client(ClientError::new(ClientErrorKind::WriteFailed))
    }

    /// Peer disconnected. Used by [`GattClient`](crate::gatt::GattClient) implementations.
    pub fn disconnected() -> Self {
        Self::Client(ClientError::new(ClientErrorKind::Disconnected))
    }

    /// Operation timed out. Used by [`GattClient`](crate::gatt::GattClient) implementations.
    pub fn timeout() -> Self {
        Self::Client(ClientError::new(ClientErrorKind::Timeout))
    }

    /// Check if this is a malformed-descriptor error
    pub fn is_descriptor(&self) -> bool {
        matches!(self, MarshalError::Descriptor(_))
    }

    /// Check if this is an unmarshall length mismatch
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, MarshalError::Value(e) if e.is_length_mismatch())
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for MarshalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarshalError::Descriptor(e) => write!(f, "Descriptor error: {:?}", e.kind),
            MarshalError::Value(e) => write!(f, "Value error: {:?}", e.kind),
            MarshalError::Uuid(e) => write!(f, "UUID error: {:?}", e.kind),
            MarshalError::Registry(e) => write!(f, "Registry error: {:?}", e.kind),
            MarshalError::Client(e) => write!(f, "GATT client error: {:?}", e.kind),
        }
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for MarshalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_helpers() {
        assert!(MarshalError::invalid_descriptor_length().is_descriptor());
        assert!(MarshalError::length_mismatch().is_length_mismatch());
        assert!(!MarshalError::type_mismatch().is_length_mismatch());
    }

    #[test]
    fn test_value_error_kinds() {
        match MarshalError::value_out_of_range() {
            MarshalError::Value(e) => {
                assert!(e.is_out_of_range());
                assert!(!e.is_type_mismatch());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_descriptor_error_captures_backtrace() {
        // Same capture policy as every other category
        let MarshalError::Descriptor(descriptor) = MarshalError::invalid_descriptor_length() else {
            panic!("expected descriptor error");
        };
        let MarshalError::Value(value) = MarshalError::length_mismatch() else {
            panic!("expected value error");
        };
        assert_eq!(descriptor.backtrace.status(), value.backtrace.status());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", MarshalError::invalid_descriptor_length()),
            "Descriptor error: InvalidLength"
        );
        assert_eq!(
            format!("{}", MarshalError::already_registered()),
            "Registry error: AlreadyRegistered"
        );
        assert_eq!(format!("{}", MarshalError::timeout()), "GATT client error: Timeout");
    }
}
