//! High-level MPU-9250 device driver implementation.

use crate::bridge::{Session, TransferBridge};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::init::{run_plan, InitState, INIT_PLAN};
use crate::interface::i2c::I2cInterface;
use crate::interface::Mpu9250Interface;
use crate::link;
use crate::log::{log_info, log_warn};
use crate::params::{AccelBandwidth, AccelRange, ClockSource, GyroBandwidth, GyroRange};
use crate::registers::{
    AccelConfig,
    AccelConfig2,
    FilterConfig,
    GyroConfig,
    I2cMasterControl,
    PowerManagement1,
    PowerManagement2,
    Register,
    UserControl,
    I2C_MST_CLK_400KHZ,
    REG_SMPLRT_DIV,
    WhoAmI,
};
use embedded_hal::i2c::I2c;

/// High-level synchronous driver for the MPU-9250.
///
/// Owns the bus transport and the transfer buffer for its whole lifetime.
/// The transfer bridge is only reachable through [`Mpu9250::open`] once
/// [`Mpu9250::init`] has completed.
pub struct Mpu9250<IFACE> {
    interface: IFACE,
    bridge: TransferBridge,
    state: InitState,
}

/// Decoded read-back of every register the initialization plan programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationSnapshot {
    /// USER_CTRL[5] I2C_MST_EN.
    pub i2c_master_enabled: bool,
    /// I2C_MST_CTRL[3:0] I2C_MST_CLK.
    pub i2c_master_clock: u8,
    /// PWR_MGMT_1[2:0] CLKSEL.
    pub clock_source: ClockSource,
    /// ACCEL_CONFIG[4:3] ACCEL_FS_SEL.
    pub accel_range: AccelRange,
    /// GYRO_CONFIG[4:3] GYRO_FS_SEL.
    pub gyro_range: GyroRange,
    /// ACCEL_CONFIG2[2:0] A_DLPF_CFG.
    pub accel_bandwidth: AccelBandwidth,
    /// CONFIG[2:0] DLPF_CFG.
    pub gyro_bandwidth: GyroBandwidth,
    /// SMPLRT_DIV.
    pub sample_rate_divider: u8,
    /// PWR_MGMT_2[5:0] all clear.
    pub all_sensors_enabled: bool,
}

impl ConfigurationSnapshot {
    /// Returns `true` when the read-back matches what the initialization plan programs.
    pub fn matches_init_plan(&self) -> bool {
        self.i2c_master_enabled
            && self.i2c_master_clock == I2C_MST_CLK_400KHZ
            && self.clock_source == ClockSource::AutoPll
            && self.accel_range == AccelRange::G16
            && self.gyro_range == GyroRange::Dps2000
            && self.accel_bandwidth == AccelBandwidth::Hz184
            && self.gyro_bandwidth == GyroBandwidth::Hz184
            && self.sample_rate_divider == 0
            && self.all_sensors_enabled
    }
}

impl<IFACE> Mpu9250<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new, not yet initialized, driver instance from the provided bus interface.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            bridge: TransferBridge::new(),
            state: InitState::NotStarted,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Current attach progress.
    pub fn state(&self) -> InitState {
        self.state
    }

    /// Number of sessions opened since construction.
    pub fn open_count(&self) -> u32 {
        self.bridge.open_count()
    }
}

impl<I2C> Mpu9250<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, config: Config) -> Result<Self, I2C::Error> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        Ok(Self::new(I2cInterface::new(i2c, config.address)))
    }

    /// Releases the driver, returning the I2C bus.
    pub fn release_i2c(self) -> I2C {
        self.release().release()
    }
}

impl<IFACE, CommE> Mpu9250<IFACE>
where
    IFACE: Mpu9250Interface<Error = CommE>,
{
    // ==================================================================
    // == Attach ========================================================
    // ==================================================================
    /// Checks the identity and applies the initialization plan.
    ///
    /// Stops at the first failure without rolling back earlier steps. On
    /// failure the transfer bridge stays closed; calling `init` again restarts
    /// the whole sequence.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.state = InitState::NotStarted;

        let _code = self.check_identity()?;
        log_info!("who am i check success ({=u8:#x})", _code);

        match run_plan(&mut self.interface, &INIT_PLAN) {
            Ok(()) => {
                self.state = InitState::Ready;
                log_info!("mpu9250 ready");
                Ok(())
            }
            Err(err) => {
                if let Some(step) = err.step() {
                    self.state = InitState::Failed(step);
                }
                Err(err)
            }
        }
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the raw `WHO_AM_I` code.
    pub fn probe_identity(&mut self) -> Result<u8, CommE> {
        self.read_typed::<WhoAmI>().map(|id| id.0)
    }

    /// Reads `WHO_AM_I` once and accepts only the supported silicon revisions.
    ///
    /// A bus failure is reported as an unsupported device with no code rather
    /// than retried.
    pub fn check_identity(&mut self) -> Result<u8, CommE> {
        match self.read_typed::<WhoAmI>() {
            Ok(id) if id.is_supported() => Ok(id.0),
            Ok(WhoAmI(code)) => {
                log_warn!("who am i check fail ({=u8:#x})", code);
                Err(Error::UnsupportedDevice(Some(code)))
            }
            Err(_) => {
                log_warn!("who am i check fail (no response)");
                Err(Error::UnsupportedDevice(None))
            }
        }
    }

    // ==================================================================
    // == Register Access ===============================================
    // ==================================================================
    /// Reads one register.
    pub fn read_register(&mut self, register: u8) -> Result<u8, CommE> {
        link::read_register(&mut self.interface, register)
    }

    /// Writes one register and confirms it by reading it back.
    pub fn write_verified(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        link::write_verified(&mut self.interface, register, value)
    }

    /// Reads back and decodes every register programmed by the initialization plan.
    pub fn read_configuration(&mut self) -> Result<ConfigurationSnapshot, CommE> {
        let user: UserControl = self.read_typed()?;
        let master: I2cMasterControl = self.read_typed()?;
        let power1: PowerManagement1 = self.read_typed()?;
        let accel: AccelConfig = self.read_typed()?;
        let gyro: GyroConfig = self.read_typed()?;
        let accel2: AccelConfig2 = self.read_typed()?;
        let filter: FilterConfig = self.read_typed()?;
        let divider = self.read_register(REG_SMPLRT_DIV)?;
        let power2: PowerManagement2 = self.read_typed()?;

        Ok(ConfigurationSnapshot {
            i2c_master_enabled: user.i2c_master_enable(),
            i2c_master_clock: master.clock(),
            clock_source: power1.clock_source(),
            accel_range: accel.range(),
            gyro_range: gyro.range(),
            accel_bandwidth: accel2.bandwidth(),
            gyro_bandwidth: filter.gyro_bandwidth(),
            sample_rate_divider: divider,
            all_sensors_enabled: power2.all_sensors_enabled(),
        })
    }

    // ==================================================================
    // == Transfer Bridge ===============================================
    // ==================================================================
    /// Opens an exclusive session on the transfer bridge.
    ///
    /// Fails with [`Error::NotReady`] unless [`Mpu9250::init`] completed.
    pub fn open(&mut self) -> Result<Session<'_, IFACE>, CommE> {
        if !self.state.is_ready() {
            log_warn!("open refused: driver not initialized");
            return Err(Error::NotReady);
        }

        Ok(Session::new(&mut self.interface, &mut self.bridge))
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn read_typed<R>(&mut self) -> Result<R, CommE>
    where
        R: Register<Raw = u8> + From<u8>,
    {
        self.read_register(R::ADDRESS).map(R::from)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::init::InitStep;
    use crate::interface::mock::{
        register_read, verified_write, BusFault, Expectation, ScriptedBus,
    };
    use crate::registers::{DIS_GYRO, REG_ACCEL_XOUT_H, REG_WHO_AM_I};
    use std::vec::Vec;

    fn attach_script(identity: u8) -> Vec<Expectation> {
        let mut script: Vec<Expectation> = register_read(REG_WHO_AM_I, identity).into();
        for entry in INIT_PLAN.iter() {
            script.extend(verified_write(entry.register, entry.value, entry.value));
        }
        script
    }

    #[test]
    fn identity_whitelist_covers_every_code() {
        for code in 0..=u8::MAX {
            let mut device = Mpu9250::new(ScriptedBus::new(register_read(REG_WHO_AM_I, code)));
            let result = device.check_identity();
            if code == 113 || code == 115 {
                assert_eq!(result, Ok(code));
            } else {
                assert_eq!(result, Err(Error::UnsupportedDevice(Some(code))));
            }
        }
    }

    #[test]
    fn unreadable_identity_is_unsupported() {
        let mut device = Mpu9250::new(ScriptedBus::new([
            Expectation::send(&[REG_WHO_AM_I]).fail(),
        ]));

        assert_eq!(device.check_identity(), Err(Error::UnsupportedDevice(None)));
    }

    #[test]
    fn probe_identity_is_idempotent() {
        let mut script: Vec<Expectation> = register_read(REG_WHO_AM_I, 0x73).into();
        script.extend(register_read(REG_WHO_AM_I, 0x73));
        let mut device = Mpu9250::new(ScriptedBus::new(script));

        let first = device.probe_identity().unwrap();
        let second = device.probe_identity().unwrap();
        assert_eq!(first, second);
        assert_eq!(device.state(), InitState::NotStarted);
    }

    #[test]
    fn init_reaches_ready() {
        let mut device = Mpu9250::new(ScriptedBus::new(attach_script(0x71)));

        assert_eq!(device.init(), Ok(()));
        assert_eq!(device.state(), InitState::Ready);
    }

    #[test]
    fn unsupported_device_aborts_before_any_write() {
        let mut device = Mpu9250::new(ScriptedBus::new(register_read(REG_WHO_AM_I, 0x70)));

        assert_eq!(device.init(), Err(Error::UnsupportedDevice(Some(0x70))));
        assert_eq!(device.state(), InitState::NotStarted);
        assert!(matches!(device.open(), Err(Error::NotReady)));
        assert_eq!(device.open_count(), 0);
    }

    #[test]
    fn failed_step_is_recorded_and_bridge_stays_closed() {
        let mut script: Vec<Expectation> = register_read(REG_WHO_AM_I, 0x71).into();
        script.extend(verified_write(INIT_PLAN[0].register, INIT_PLAN[0].value, INIT_PLAN[0].value));
        script.extend(verified_write(INIT_PLAN[1].register, INIT_PLAN[1].value, 0x00));
        let mut device = Mpu9250::new(ScriptedBus::new(script));

        let err = device.init().unwrap_err();
        assert_eq!(err, Error::StepFailed(InitStep::I2cMasterClock));
        assert!(err.is_attach_failure());
        assert_eq!(device.state(), InitState::Failed(InitStep::I2cMasterClock));
        assert!(matches!(device.open(), Err(Error::NotReady)));
    }

    #[test]
    fn init_can_be_retried_after_failure() {
        let mut script: Vec<Expectation> = register_read(REG_WHO_AM_I, 0x71).into();
        script.push(Expectation::send(&[INIT_PLAN[0].register, INIT_PLAN[0].value]).fail());
        script.extend(attach_script(0x71));
        let mut device = Mpu9250::new(ScriptedBus::new(script));

        assert_eq!(device.init(), Err(Error::StepFailed(InitStep::EnableI2cMaster)));
        assert_eq!(device.init(), Ok(()));
        assert!(device.state().is_ready());
    }

    #[test]
    fn session_passes_register_block_through_unmodified() {
        let motion: [u8; 14] = [
            0x01, 0x02, 0xFF, 0xFE, 0x40, 0x00, 0x0B, 0xB8, 0x80, 0x00, 0x7F, 0xFF, 0x00, 0x10,
        ];
        let mut script = attach_script(0x71);
        script.push(Expectation::send(&[REG_ACCEL_XOUT_H]));
        script.push(Expectation::recv(15, &motion));
        let mut device = Mpu9250::new(ScriptedBus::new(script));
        device.init().unwrap();

        let mut session = device.open().unwrap();
        assert_eq!(session.write(&[REG_ACCEL_XOUT_H]), Ok(1));
        assert_eq!(session.pending(), 1);
        assert_eq!(session.read(15).unwrap(), &motion[..]);
        assert_eq!(session.pending(), 0);
        session.close();

        assert_eq!(device.open_count(), 1);
    }

    #[test]
    fn bridge_fault_does_not_end_the_session() {
        let mut script = attach_script(0x73);
        script.push(Expectation::send(&[REG_ACCEL_XOUT_H]).fail());
        script.push(Expectation::send(&[REG_ACCEL_XOUT_H]));
        script.push(Expectation::recv(2, &[0x12, 0x34]));
        let mut device = Mpu9250::new(ScriptedBus::new(script));
        device.init().unwrap();

        let mut session = device.open().unwrap();
        assert_eq!(session.write(&[REG_ACCEL_XOUT_H]), Err(Error::Bridge(BusFault)));
        assert_eq!(session.write(&[REG_ACCEL_XOUT_H]), Ok(1));

        let mut out = [0u8; 2];
        assert_eq!(session.read_into(&mut out), Ok(2));
        assert_eq!(out, [0x12, 0x34]);
        session.close();

        assert_eq!(device.state(), InitState::Ready);
    }

    #[test]
    fn open_count_tracks_every_session() {
        let mut device = Mpu9250::new(ScriptedBus::new(attach_script(0x71)));
        device.init().unwrap();

        for expected in 1..=3 {
            let session = device.open().unwrap();
            assert_eq!(session.open_count(), expected);
            session.close();
        }
        assert_eq!(device.open_count(), 3);
    }

    #[test]
    fn read_configuration_decodes_plan_values() {
        let mut script = Vec::new();
        for entry in INIT_PLAN.iter() {
            script.extend(register_read(entry.register, entry.value));
        }
        let mut device = Mpu9250::new(ScriptedBus::new(script));

        let snapshot = device.read_configuration().unwrap();
        assert!(snapshot.matches_init_plan());
        assert_eq!(snapshot.accel_range, AccelRange::G16);
        assert_eq!(snapshot.gyro_bandwidth, GyroBandwidth::Hz184);
    }

    #[test]
    fn read_configuration_flags_disabled_gyro() {
        let mut script = Vec::new();
        for entry in INIT_PLAN.iter() {
            let value = if entry.step == InitStep::EnableSensors { DIS_GYRO } else { entry.value };
            script.extend(register_read(entry.register, value));
        }
        let mut device = Mpu9250::new(ScriptedBus::new(script));

        let snapshot = device.read_configuration().unwrap();
        assert!(!snapshot.all_sensors_enabled);
        assert!(!snapshot.matches_init_plan());
    }
}
