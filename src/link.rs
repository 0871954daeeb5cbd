//! Single-register access over the raw transport.
//!
//! Every register access is an address write followed, for reads, by a
//! separate one-byte bus read. A transfer reporting zero bytes is treated the
//! same as a bus error.

use crate::error::{Error, Result};
use crate::interface::Mpu9250Interface;

/// Reads one register.
pub fn read_register<IFACE>(interface: &mut IFACE, register: u8) -> Result<u8, IFACE::Error>
where
    IFACE: Mpu9250Interface,
{
    let mut value = [0u8; 1];
    expect_transfer(interface.send(core::slice::from_ref(&register))?)?;
    expect_transfer(interface.recv(&mut value)?)?;
    Ok(value[0])
}

/// Writes one register without reading it back.
pub fn write_register<IFACE>(
    interface: &mut IFACE,
    register: u8,
    value: u8,
) -> Result<(), IFACE::Error>
where
    IFACE: Mpu9250Interface,
{
    expect_transfer(interface.send(&[register, value])?)
}

/// Writes one register and confirms the value stuck by reading it back.
pub fn write_verified<IFACE>(
    interface: &mut IFACE,
    register: u8,
    value: u8,
) -> Result<(), IFACE::Error>
where
    IFACE: Mpu9250Interface,
{
    write_register(interface, register, value)?;

    let read = read_register(interface, register)?;
    if read != value {
        return Err(Error::VerifyMismatch {
            register,
            written: value,
            read,
        });
    }

    Ok(())
}

fn expect_transfer<E>(count: usize) -> Result<(), E> {
    if count == 0 {
        return Err(Error::NoTransfer);
    }
    Ok(())
}
