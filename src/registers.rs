//! Register map definitions for the MPU-9250.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{AccelBandwidth, AccelRange, ClockSource, GyroBandwidth, GyroRange};

// Configuration and power.
/// Register address of `SMPLRT_DIV`.
pub const REG_SMPLRT_DIV: u8 = 0x19;
/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0x1A;
/// Register address of `GYRO_CONFIG`.
pub const REG_GYRO_CONFIG: u8 = 0x1B;
/// Register address of `ACCEL_CONFIG`.
pub const REG_ACCEL_CONFIG: u8 = 0x1C;
/// Register address of `ACCEL_CONFIG2`.
pub const REG_ACCEL_CONFIG2: u8 = 0x1D;
/// Register address of `LP_ACCEL_ODR`, the low-power accelerometer output rate.
pub const REG_LP_ACCEL_ODR: u8 = 0x1E;
/// Register address of `WOM_THR`, the wake-on-motion threshold.
pub const REG_WOM_THR: u8 = 0x1F;
/// Register address of `FIFO_EN`.
pub const REG_FIFO_EN: u8 = 0x23;

// Auxiliary I2C master.
/// Register address of `I2C_MST_CTRL`.
pub const REG_I2C_MST_CTRL: u8 = 0x24;
/// Register address of `I2C_SLV0_ADDR`.
pub const REG_I2C_SLV0_ADDR: u8 = 0x25;
/// Register address of `I2C_SLV0_REG`.
pub const REG_I2C_SLV0_REG: u8 = 0x26;
/// Register address of `I2C_SLV0_CTRL`.
pub const REG_I2C_SLV0_CTRL: u8 = 0x27;
/// Register address of `I2C_SLV0_DO`.
pub const REG_I2C_SLV0_DO: u8 = 0x63;

// Interrupts.
/// Register address of `INT_PIN_CFG`.
pub const REG_INT_PIN_CFG: u8 = 0x37;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x38;

// Data output.
/// Register address of `ACCEL_XOUT_H`, first byte of the 14-byte accel/temp/gyro block.
pub const REG_ACCEL_XOUT_H: u8 = 0x3B;
/// Register address of `TEMP_OUT_H`.
pub const REG_TEMP_OUT_H: u8 = 0x41;
/// Register address of `GYRO_XOUT_H`.
pub const REG_GYRO_XOUT_H: u8 = 0x43;
/// Register address of `EXT_SENS_DATA_00`, first byte read back from auxiliary sensors.
pub const REG_EXT_SENS_DATA_00: u8 = 0x49;

// Motion detection, user control, FIFO and identity.
/// Register address of `MOT_DETECT_CTRL`.
pub const REG_MOT_DETECT_CTRL: u8 = 0x69;
/// Register address of `USER_CTRL`.
pub const REG_USER_CTRL: u8 = 0x6A;
/// Register address of `PWR_MGMT_1`.
pub const REG_PWR_MGMT_1: u8 = 0x6B;
/// Register address of `PWR_MGMT_2`.
pub const REG_PWR_MGMT_2: u8 = 0x6C;
/// Register address of `FIFO_COUNTH`, high byte of the FIFO fill level.
pub const REG_FIFO_COUNT: u8 = 0x72;
/// Register address of `FIFO_R_W`.
pub const REG_FIFO_R_W: u8 = 0x74;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x75;

/// Length of the accel/temp/gyro output block starting at [`REG_ACCEL_XOUT_H`].
pub const RAW_MOTION_BYTES: usize = 14;

/// `WHO_AM_I` codes of the supported silicon revisions (113 and 115).
pub const ACCEPTED_IDENTITIES: [u8; 2] = [0x71, 0x73];

/// `USER_CTRL.I2C_MST_EN`.
pub const I2C_MST_EN: u8 = 0x20;
/// `I2C_MST_CTRL.I2C_MST_CLK` value for a 400 kHz master clock.
pub const I2C_MST_CLK_400KHZ: u8 = 0x0D;
/// `PWR_MGMT_1.CLKSEL` value selecting the PLL when available.
pub const CLOCK_SEL_PLL: u8 = 0x01;
/// `ACCEL_CONFIG` value for ±16 g.
pub const ACCEL_FS_SEL_16G: u8 = 0x18;
/// `GYRO_CONFIG` value for ±2000 °/s.
pub const GYRO_FS_SEL_2000DPS: u8 = 0x18;
/// `ACCEL_CONFIG2` value for the 184 Hz low-pass filter.
pub const ACCEL_DLPF_184: u8 = 0x01;
/// `CONFIG` value for the 184 Hz gyroscope low-pass filter.
pub const GYRO_DLPF_184: u8 = 0x01;
/// `PWR_MGMT_2` value enabling every accelerometer and gyroscope axis.
pub const SENSORS_ENABLE_ALL: u8 = 0x00;
/// `PWR_MGMT_2` value disabling the three gyroscope axes.
pub const DIS_GYRO: u8 = 0x07;
/// `PWR_MGMT_1.H_RESET`, self-clearing device reset.
pub const PWR_RESET: u8 = 0x80;
/// `PWR_MGMT_1.CYCLE`, alternate between sleep and single samples.
pub const PWR_CYCLE: u8 = 0x20;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the register map.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Power-on reset value defined by the register map.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Generates the byte conversions shared by every single-byte bitfield.
macro_rules! byte_register {
    ($name:ident, $address:expr, $access:expr, $reset:expr) => {
        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Register for $name {
            type Raw = u8;
            const ADDRESS: u8 = $address;
            const ACCESS: RegisterAccess = $access;
            const RESET_VALUE: Option<Self::Raw> = $reset;
        }
    };
}

/// Bitfield representation of the `CONFIG` register (address `0x1A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    // Gyroscope and temperature low-pass filter (bits 2:0).
    pub gyro_bandwidth: GyroBandwidth,
    // FSYNC sampling location (bits 5:3).
    pub ext_sync_set: B3,
    // FIFO overwrite-when-full behaviour (bit 6).
    pub fifo_mode: bool,
    #[skip]
    __: B1,
}

byte_register!(FilterConfig, REG_CONFIG, RegisterAccess::ReadWrite, Some(0x00));

/// Bitfield representation of the `GYRO_CONFIG` register (address `0x1B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GyroConfig {
    // Filter bypass selection, inverted (bits 1:0).
    pub fchoice_b: B2,
    #[skip]
    __: B1,
    // Full-scale selection (bits 4:3).
    pub range: GyroRange,
    // Per-axis self-test enables (bits 7:5, Z/Y/X).
    pub z_self_test: bool,
    pub y_self_test: bool,
    pub x_self_test: bool,
}

byte_register!(GyroConfig, REG_GYRO_CONFIG, RegisterAccess::ReadWrite, Some(0x00));

/// Bitfield representation of the `ACCEL_CONFIG` register (address `0x1C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelConfig {
    #[skip]
    __: B3,
    // Full-scale selection (bits 4:3).
    pub range: AccelRange,
    // Per-axis self-test enables (bits 7:5, Z/Y/X).
    pub z_self_test: bool,
    pub y_self_test: bool,
    pub x_self_test: bool,
}

byte_register!(AccelConfig, REG_ACCEL_CONFIG, RegisterAccess::ReadWrite, Some(0x00));

/// Bitfield representation of the `ACCEL_CONFIG2` register (address `0x1D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelConfig2 {
    // Accelerometer low-pass filter (bits 2:0).
    pub bandwidth: AccelBandwidth,
    // Filter bypass, inverted (bit 3).
    pub fchoice_b: bool,
    #[skip]
    __: B4,
}

byte_register!(AccelConfig2, REG_ACCEL_CONFIG2, RegisterAccess::ReadWrite, Some(0x00));

/// Bitfield representation of the `I2C_MST_CTRL` register (address `0x24`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cMasterControl {
    // Master clock divider (bits 3:0).
    pub clock: B4,
    // Stop between reads instead of restart (bit 4).
    pub stop_between_reads: bool,
    // Slave 3 data to FIFO (bit 5).
    pub slv3_fifo_en: bool,
    // Delay data-ready until external sensor data is loaded (bit 6).
    pub wait_for_external: bool,
    // Multi-master enable (bit 7).
    pub multi_master: bool,
}

byte_register!(I2cMasterControl, REG_I2C_MST_CTRL, RegisterAccess::ReadWrite, Some(0x00));

/// Bitfield representation of the `USER_CTRL` register (address `0x6A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserControl {
    // Signal path reset (bit 0).
    pub sig_cond_reset: bool,
    // I2C master reset (bit 1).
    pub i2c_master_reset: bool,
    // FIFO reset (bit 2).
    pub fifo_reset: bool,
    #[skip]
    __: B1,
    // Disable the I2C slave interface, SPI only (bit 4).
    pub i2c_if_disable: bool,
    // I2C master mode enable (bit 5).
    pub i2c_master_enable: bool,
    // FIFO enable (bit 6).
    pub fifo_enable: bool,
    #[skip]
    __: B1,
}

byte_register!(UserControl, REG_USER_CTRL, RegisterAccess::ReadWrite, Some(0x00));

/// Bitfield representation of the `PWR_MGMT_1` register (address `0x6B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagement1 {
    // Clock source selection (bits 2:0).
    pub clock_select: B3,
    // Power down the PTAT voltage generator (bit 3).
    pub pd_ptat: bool,
    // Gyroscope standby (bit 4).
    pub gyro_standby: bool,
    // Cycle between sleep and sampling (bit 5).
    pub cycle: bool,
    // Sleep mode (bit 6).
    pub sleep: bool,
    // Hard reset, self-clearing (bit 7).
    pub hard_reset: bool,
}

impl PowerManagement1 {
    /// Decoded clock source.
    pub fn clock_source(&self) -> ClockSource {
        ClockSource::from_bits(self.clock_select())
    }
}

byte_register!(PowerManagement1, REG_PWR_MGMT_1, RegisterAccess::ReadWrite, Some(0x01));

/// Bitfield representation of the `PWR_MGMT_2` register (address `0x6C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagement2 {
    // Axis disable flags (bits 5:0, gyro Z/Y/X then accel Z/Y/X).
    pub disable_gyro_z: bool,
    pub disable_gyro_y: bool,
    pub disable_gyro_x: bool,
    pub disable_accel_z: bool,
    pub disable_accel_y: bool,
    pub disable_accel_x: bool,
    #[skip]
    __: B2,
}

impl PowerManagement2 {
    /// Returns `true` when every accelerometer and gyroscope axis is enabled.
    pub fn all_sensors_enabled(&self) -> bool {
        u8::from(*self) & 0x3F == 0
    }
}

byte_register!(PowerManagement2, REG_PWR_MGMT_2, RegisterAccess::ReadWrite, Some(0x00));

/// Identity code held in the read-only `WHO_AM_I` register (address `0x75`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WhoAmI(pub u8);

impl WhoAmI {
    /// Returns `true` for the supported silicon revisions.
    pub fn is_supported(&self) -> bool {
        is_supported_identity(self.0)
    }
}

impl From<u8> for WhoAmI {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl Register for WhoAmI {
    type Raw = u8;
    const ADDRESS: u8 = REG_WHO_AM_I;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(0x71);
}

/// Returns `true` when `code` is a supported `WHO_AM_I` value.
pub fn is_supported_identity(code: u8) -> bool {
    ACCEPTED_IDENTITIES.contains(&code)
}
