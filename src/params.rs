//! Strongly typed parameter enumerations for the MPU-9250 driver.
//!
//! These enums map directly to datasheet field encodings and are used by the
//! register bitfield views in [`registers`](crate::registers). The driver
//! programs a fixed configuration; these types exist so read-back values can be
//! decoded and checked without juggling raw integers.
//!
//! # Examples
//!
//! ```rust
//! use mpu9250_bridge::params::{AccelRange, GyroRange};
//!
//! assert_eq!(AccelRange::G16.max_g(), 16);
//! assert_eq!(GyroRange::Dps2000.max_dps(), 2_000);
//! ```

use modular_bitfield::prelude::Specifier;

/// Accelerometer full-scale selections encoded in `ACCEL_CONFIG.ACCEL_FS_SEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum AccelRange {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl AccelRange {
    /// Returns the full-scale magnitude in g.
    pub const fn max_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }
}

/// Gyroscope full-scale selections encoded in `GYRO_CONFIG.GYRO_FS_SEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum GyroRange {
    /// ±250 °/s.
    Dps250 = 0b00,
    /// ±500 °/s.
    Dps500 = 0b01,
    /// ±1000 °/s.
    Dps1000 = 0b10,
    /// ±2000 °/s.
    Dps2000 = 0b11,
}

impl GyroRange {
    /// Returns the full-scale magnitude in degrees per second.
    pub const fn max_dps(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1_000,
            Self::Dps2000 => 2_000,
        }
    }
}

/// Accelerometer low-pass filter selections encoded in `ACCEL_CONFIG2.A_DLPF_CFG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum AccelBandwidth {
    /// 218 Hz.
    Hz218 = 0,
    /// 184 Hz.
    Hz184 = 1,
    /// 92 Hz.
    Hz92 = 2,
    /// 41 Hz.
    Hz41 = 3,
    /// 20 Hz.
    Hz20 = 4,
    /// 10 Hz.
    Hz10 = 5,
    /// 5 Hz.
    Hz5 = 6,
    /// 420 Hz.
    Hz420 = 7,
}

/// Gyroscope low-pass filter selections encoded in `CONFIG.DLPF_CFG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum GyroBandwidth {
    /// 250 Hz.
    Hz250 = 0,
    /// 184 Hz.
    Hz184 = 1,
    /// 92 Hz.
    Hz92 = 2,
    /// 41 Hz.
    Hz41 = 3,
    /// 20 Hz.
    Hz20 = 4,
    /// 10 Hz.
    Hz10 = 5,
    /// 5 Hz.
    Hz5 = 6,
    /// 3600 Hz.
    Hz3600 = 7,
}

impl AccelBandwidth {
    /// Returns the nominal cutoff in hertz.
    pub const fn hz(self) -> u16 {
        match self {
            Self::Hz218 => 218,
            Self::Hz184 => 184,
            Self::Hz92 => 92,
            Self::Hz41 => 41,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
            Self::Hz420 => 420,
        }
    }
}

impl GyroBandwidth {
    /// Returns the nominal cutoff in hertz.
    pub const fn hz(self) -> u16 {
        match self {
            Self::Hz250 => 250,
            Self::Hz184 => 184,
            Self::Hz92 => 92,
            Self::Hz41 => 41,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
            Self::Hz3600 => 3_600,
        }
    }
}

/// Clock sources selected by `PWR_MGMT_1.CLKSEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 20 MHz oscillator (`CLKSEL` 0 or 6).
    Internal,
    /// PLL when ready, internal oscillator otherwise (`CLKSEL` 1..=5).
    AutoPll,
    /// Clock stopped, timing generator held in reset (`CLKSEL` 7).
    Stopped,
}

impl ClockSource {
    /// Decodes the 3-bit `CLKSEL` field.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            1..=5 => Self::AutoPll,
            7 => Self::Stopped,
            _ => Self::Internal,
        }
    }
}
