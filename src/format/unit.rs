//! Presentation format units.
//!
//! The unit field of the 0x2904 descriptor is a 16-bit alias from the
//! Bluetooth SIG units table (`org.bluetooth.unit.*`, range 0x2700-0x27FF).
//! It is carried as metadata only and never changes how a value is converted.

use core::fmt;

/// SIG unit alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Unit(u16);

impl Unit {
    /// unitless
    pub const UNITLESS: Self = Self(0x2700);
    /// length (metre)
    pub const METRE: Self = Self(0x2701);
    /// mass (kilogram)
    pub const KILOGRAM: Self = Self(0x2702);
    /// time (second)
    pub const SECOND: Self = Self(0x2703);
    /// electric current (ampere)
    pub const AMPERE: Self = Self(0x2704);
    /// thermodynamic temperature (kelvin)
    pub const KELVIN: Self = Self(0x2705);
    /// frequency (hertz)
    pub const HERTZ: Self = Self(0x2722);
    /// pressure (pascal)
    pub const PASCAL: Self = Self(0x2724);
    /// energy (joule)
    pub const JOULE: Self = Self(0x2725);
    /// power (watt)
    pub const WATT: Self = Self(0x2726);
    /// electric potential difference (volt)
    pub const VOLT: Self = Self(0x2728);
    /// Celsius temperature (degree Celsius)
    pub const CELSIUS: Self = Self(0x272F);
    /// illuminance (lux)
    pub const LUX: Self = Self(0x2731);
    /// plane angle (degree)
    pub const DEGREE: Self = Self(0x2763);
    /// pressure (bar)
    pub const BAR: Self = Self(0x2780);
    /// percentage
    pub const PERCENTAGE: Self = Self(0x27AD);
    /// angular velocity (revolution per minute)
    pub const RPM: Self = Self(0x27A8);
    /// logarithmic radio quantity (decibel)
    pub const DECIBEL: Self = Self(0x27C3);

    /// Wrap a raw unit alias
    #[inline(always)]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Get the raw unit alias
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get a display symbol for well-known units
    pub const fn symbol(self) -> Option<&'static str> {
        match self.0 {
            0x2700 => Some(""),
            0x2701 => Some("m"),
            0x2702 => Some("kg"),
            0x2703 => Some("s"),
            0x2704 => Some("A"),
            0x2705 => Some("K"),
            0x2722 => Some("Hz"),
            0x2724 => Some("Pa"),
            0x2725 => Some("J"),
            0x2726 => Some("W"),
            0x2728 => Some("V"),
            0x272F => Some("°C"),
            0x2731 => Some("lx"),
            0x2763 => Some("°"),
            0x2780 => Some("bar"),
            0x27A8 => Some("rpm"),
            0x27AD => Some("%"),
            0x27C3 => Some("dB"),
            _ => None,
        }
    }
}

impl From<u16> for Unit {
    #[inline(always)]
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Unit> for u16 {
    #[inline(always)]
    fn from(unit: Unit) -> u16 {
        unit.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => write!(f, "unit 0x{:04X}", self.0),
        }
    }
}
