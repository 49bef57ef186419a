//! Unified Logging Macros for gatt-marshal
//!
//! This module provides a unified logging interface that automatically
//! selects between `defmt::` and `log::` based on the active feature flags.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::gatt_log;
//!
//! gatt_log!(debug, "Resolved codec for format {}", code);
//! gatt_log!(warn, "Unsupported presentation format {}", code);
//! gatt_log!(trace, "Read {} bytes", n);
//! ```
//!
//! # Feature Flags
//!
//! - `defmt` - Uses `defmt::` (preferred on embedded targets)
//! - `log` - Uses `log::` (host tools, USB serial loggers)
//! - Neither - Log statements compile to nothing

/// Unified logging macro - automatically selects defmt:: or log:: based on features
///
/// `defmt` wins when both features are enabled. Format strings must stay
/// within the `{}` subset both backends accept.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::gatt_log;
///
/// // Simple message
/// gatt_log!(info, "Registry initialized");
///
/// // With formatting
/// gatt_log!(debug, "Exponent: {}", exponent);
/// ```
#[macro_export]
#[cfg(feature = "defmt")]
macro_rules! gatt_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! gatt_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! gatt_log {
    ($level:ident, $($arg:tt)*) => {{}};
}
