#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # gatt-marshal
//!
//! Typed Bluetooth LE characteristic values driven by the Characteristic
//! Presentation Format (0x2904) descriptor.
//!
//! ## Features
//!
//! - Format table for every fixed-width numeric format plus `utf8s` and `struct`
//! - Decimal exponent scaling in both directions
//! - UUID overrides for characteristics whose descriptor is missing or wrong
//! - Async typed client over any [`GattClient`](gatt::GattClient), with codec caching
//! - `no_std`, no allocation
//!
//! ## Example
//!
//! ```rust
//! use gatt_marshal::{Resolver, Value};
//!
//! let resolver: Resolver = Resolver::new();
//! let codec = resolver.resolve(None, Some(&[0x0E, 0xFE, 0x2F, 0x27, 0x01, 0x00, 0x00]))?;
//! assert_eq!(codec.unmarshall(&[0x6A, 0x08])?, Value::F64(21.54));
//! # Ok::<(), gatt_marshal::MarshalError>(())
//! ```

// Macro modules (must be declared before use)
#[macro_use]
mod logging;
#[macro_use]
pub mod macros;

pub mod codec;
pub mod constants;
pub mod error;
pub mod format;
pub mod gatt;
pub mod registry;
pub mod resolver;
pub mod uuid;

// Re-export commonly used types
#[doc(inline)]
pub use codec::{Codec, Payload, ScaledPackCodec, Text, Value};
#[doc(inline)]
pub use error::{MarshalError, Result};
#[doc(inline)]
pub use format::{FormatCode, FormatEntry, NativeKind, PresentationFormat, Unit};
#[doc(inline)]
pub use registry::{CodecConstructor, OverrideRegistry};
#[doc(inline)]
pub use resolver::Resolver;
#[doc(inline)]
pub use uuid::CharacteristicUuid;
