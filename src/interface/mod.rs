//! Bus interface abstraction for the MPU-9250 driver.

pub mod i2c;
#[cfg(test)]
pub(crate) mod mock;

pub use self::i2c::I2cInterface;

/// Abstraction over the raw byte transport bound to one sensor address.
///
/// Both operations report the number of bytes the bus actually moved. A count
/// of zero is treated by the register layer as a failed transfer; the transfer
/// bridge passes counts through to its caller unchanged.
pub trait Mpu9250Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Issues a single bus write of `bytes` and returns the number accepted.
    fn send(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error>;

    /// Issues a single bus read into `buf` and returns the number received.
    fn recv(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error>;
}

impl<T> Mpu9250Interface for &mut T
where
    T: Mpu9250Interface + ?Sized,
{
    type Error = T::Error;

    fn send(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error> {
        (**self).send(bytes)
    }

    fn recv(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        (**self).recv(buf)
    }
}
