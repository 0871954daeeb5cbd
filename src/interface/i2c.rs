//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Mpu9250Interface;

/// I2C-based interface implementation for the MPU-9250 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface talking to the sensor at the 7-bit `address`.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit address this interface is bound to.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Mpu9250Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn send(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error> {
        if bytes.is_empty() {
            return Ok(0);
        }

        // `embedded-hal` transfers are all-or-error.
        self.i2c.write(self.address, bytes)?;
        Ok(bytes.len())
    }

    fn recv(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.i2c.read(self.address, buf)?;
        Ok(buf.len())
    }
}
