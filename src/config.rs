//! Configuration primitives for the MPU-9250 driver.

/// I2C address with the AD0 pin tied low.
pub const ADDRESS_AD0_LOW: u8 = 0x68;
/// I2C address with the AD0 pin tied high.
pub const ADDRESS_AD0_HIGH: u8 = 0x69;

/// Construction-time settings for the MPU-9250 driver.
///
/// Ranges, filters and the sample-rate divider are fixed by the
/// initialization plan and are not part of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address of the sensor.
    pub address: u8,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration names an address the part can answer on.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        match self.address {
            ADDRESS_AD0_LOW | ADDRESS_AD0_HIGH => Ok(()),
            other => Err(ConfigError::InvalidAddress(other)),
        }
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the I2C address.
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Selects the address matching the level of the AD0 pin.
    pub fn ad0(mut self, high: bool) -> Self {
        self.config.address = if high {
            ADDRESS_AD0_HIGH
        } else {
            ADDRESS_AD0_LOW
        };
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: ADDRESS_AD0_LOW,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The address is neither `0x68` nor `0x69`.
    InvalidAddress(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_ad0_low() {
        assert_eq!(Config::default().address, 0x68);
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn builder_selects_ad0_high() {
        let config = Config::new().ad0(true).build();
        assert_eq!(config.address, 0x69);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn foreign_address_is_rejected() {
        let config = Config::new().address(0x0C).build();
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0x0C)));
    }
}
