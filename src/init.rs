//! Table-driven initialization sequence.
//!
//! The plan is applied strictly in order: master mode and the clock source
//! must be established before the later steps. A failing step stops the
//! sequence; earlier steps are not rolled back.

use crate::error::{Error, Result};
use crate::interface::Mpu9250Interface;
use crate::link::write_verified;
use crate::log::{log_debug, log_error, log_info};
use crate::registers::{
    ACCEL_DLPF_184,
    ACCEL_FS_SEL_16G,
    CLOCK_SEL_PLL,
    GYRO_DLPF_184,
    GYRO_FS_SEL_2000DPS,
    I2C_MST_CLK_400KHZ,
    I2C_MST_EN,
    REG_ACCEL_CONFIG,
    REG_ACCEL_CONFIG2,
    REG_CONFIG,
    REG_GYRO_CONFIG,
    REG_I2C_MST_CTRL,
    REG_PWR_MGMT_1,
    REG_PWR_MGMT_2,
    REG_SMPLRT_DIV,
    REG_USER_CTRL,
    SENSORS_ENABLE_ALL,
};

/// One configuration write of the initialization plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InitStep {
    /// `USER_CTRL` ← `I2C_MST_EN`.
    EnableI2cMaster = 1,
    /// `I2C_MST_CTRL` ← 400 kHz master clock.
    I2cMasterClock = 2,
    /// `PWR_MGMT_1` ← PLL clock source.
    ClockSource = 3,
    /// `ACCEL_CONFIG` ← ±16 g.
    AccelRange = 4,
    /// `GYRO_CONFIG` ← ±2000 °/s.
    GyroRange = 5,
    /// `ACCEL_CONFIG2` ← 184 Hz low-pass filter.
    AccelBandwidth = 6,
    /// `CONFIG` ← 184 Hz gyroscope low-pass filter.
    GyroBandwidth = 7,
    /// `SMPLRT_DIV` ← 0.
    SampleRateDivider = 8,
    /// `PWR_MGMT_2` ← every accelerometer and gyroscope axis enabled.
    EnableSensors = 9,
}

impl InitStep {
    /// Position of the step in the plan, starting at 1.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Human-readable label used in log output.
    pub const fn description(self) -> &'static str {
        match self {
            Self::EnableI2cMaster => "enable I2C master mode",
            Self::I2cMasterClock => "set I2C master clock to 400 kHz",
            Self::ClockSource => "select PLL clock source",
            Self::AccelRange => "set accel range to 16G",
            Self::GyroRange => "set gyro range to 2000DPS",
            Self::AccelBandwidth => "set accel bandwidth to 184Hz",
            Self::GyroBandwidth => "set gyro bandwidth to 184Hz",
            Self::SampleRateDivider => "set sample rate divider to 0",
            Self::EnableSensors => "enable accelerometer and gyroscope",
        }
    }
}

/// Register write performed by one [`InitStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigStep {
    /// Step identity reported on failure.
    pub step: InitStep,
    /// Register address written.
    pub register: u8,
    /// Value written and expected on read-back.
    pub value: u8,
}

impl ConfigStep {
    const fn new(step: InitStep, register: u8, value: u8) -> Self {
        Self {
            step,
            register,
            value,
        }
    }
}

/// Ordered initialization plan applied during attach.
pub const INIT_PLAN: [ConfigStep; 9] = [
    ConfigStep::new(InitStep::EnableI2cMaster, REG_USER_CTRL, I2C_MST_EN),
    ConfigStep::new(InitStep::I2cMasterClock, REG_I2C_MST_CTRL, I2C_MST_CLK_400KHZ),
    ConfigStep::new(InitStep::ClockSource, REG_PWR_MGMT_1, CLOCK_SEL_PLL),
    ConfigStep::new(InitStep::AccelRange, REG_ACCEL_CONFIG, ACCEL_FS_SEL_16G),
    ConfigStep::new(InitStep::GyroRange, REG_GYRO_CONFIG, GYRO_FS_SEL_2000DPS),
    ConfigStep::new(InitStep::AccelBandwidth, REG_ACCEL_CONFIG2, ACCEL_DLPF_184),
    ConfigStep::new(InitStep::GyroBandwidth, REG_CONFIG, GYRO_DLPF_184),
    ConfigStep::new(InitStep::SampleRateDivider, REG_SMPLRT_DIV, 0x00),
    ConfigStep::new(InitStep::EnableSensors, REG_PWR_MGMT_2, SENSORS_ENABLE_ALL),
];

/// Attach progress of a driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// No successful initialization yet.
    NotStarted,
    /// Every step completed; the transfer bridge may be opened.
    Ready,
    /// Initialization stopped at this step.
    Failed(InitStep),
}

impl InitState {
    /// Returns `true` once the plan completed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Applies `plan` in order through verified writes.
///
/// Any transport failure or read-back mismatch collapses into
/// [`Error::StepFailed`] for the step that was executing.
pub fn run_plan<IFACE>(interface: &mut IFACE, plan: &[ConfigStep]) -> Result<(), IFACE::Error>
where
    IFACE: Mpu9250Interface,
{
    for entry in plan {
        match write_verified(interface, entry.register, entry.value) {
            Ok(()) => {
                log_debug!(
                    "init step {=u8}: {=str} ok",
                    entry.step.number(),
                    entry.step.description()
                );
            }
            Err(Error::VerifyMismatch { read, .. }) => {
                log_error!(
                    "init step {=u8}: {=str} failed, read back {=u8:#x}",
                    entry.step.number(),
                    entry.step.description(),
                    read
                );
                return Err(Error::StepFailed(entry.step));
            }
            Err(_) => {
                log_error!(
                    "init step {=u8}: {=str} failed on the bus",
                    entry.step.number(),
                    entry.step.description()
                );
                return Err(Error::StepFailed(entry.step));
            }
        }
    }

    log_info!("init plan applied ({=usize} steps)", plan.len());
    Ok(())
}
