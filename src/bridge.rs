//! Raw byte transfer bridge between a consumer and the bus.
//!
//! A single fixed buffer carries both directions: [`TransferBridge::submit`]
//! stages outbound bytes and writes them, [`TransferBridge::retrieve`] reads
//! into the same storage. Nothing here interprets register addresses or data
//! layout. Exclusive use is enforced by [`Session`], which holds mutable
//! borrows of both the bridge and the transport for as long as it lives.

use crate::error::{Error, Result};
use crate::interface::Mpu9250Interface;
use crate::log::{log_debug, log_info, log_warn};

/// Capacity of the shared transfer buffer in bytes.
pub const TRANSFER_BUFFER_SIZE: usize = 256;

/// Shared buffer and bookkeeping owned by one driver instance.
#[derive(Debug, Clone)]
pub struct TransferBridge {
    buffer: [u8; TRANSFER_BUFFER_SIZE],
    pending: usize,
    open_count: u32,
}

impl Default for TransferBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferBridge {
    /// Creates an empty bridge.
    pub const fn new() -> Self {
        Self {
            buffer: [0; TRANSFER_BUFFER_SIZE],
            pending: 0,
            open_count: 0,
        }
    }

    /// Number of bytes staged by the last `submit` and not yet cleared by a `retrieve`.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Number of sessions opened since the bridge was created.
    pub fn open_count(&self) -> u32 {
        self.open_count
    }

    pub(crate) fn record_open(&mut self) -> u32 {
        self.open_count = self.open_count.wrapping_add(1);
        self.open_count
    }

    /// Stages up to [`TRANSFER_BUFFER_SIZE`] bytes of `payload` and writes them in one transfer.
    ///
    /// Returns the byte count reported by the transport, which may be lower than
    /// the number staged. Short writes are not retried.
    pub fn submit<IFACE>(&mut self, interface: &mut IFACE, payload: &[u8]) -> Result<usize, IFACE::Error>
    where
        IFACE: Mpu9250Interface,
    {
        let len = payload.len().min(TRANSFER_BUFFER_SIZE);
        self.buffer[..len].copy_from_slice(&payload[..len]);
        self.pending = len;
        log_debug!("bridge: staged {=usize} bytes", len);

        let written = interface
            .send(&self.buffer[..len])
            .map_err(Error::Bridge)?;
        log_debug!("bridge: wrote {=usize} bytes", written);
        Ok(written)
    }

    /// Reads up to `min(max_len, TRANSFER_BUFFER_SIZE)` bytes in one transfer.
    ///
    /// Returns exactly the bytes the transport reported as received; an empty
    /// slice means the bus had nothing to deliver. A non-empty read clears the
    /// pending-write marker but leaves the buffer contents in place.
    pub fn retrieve<IFACE>(
        &mut self,
        interface: &mut IFACE,
        max_len: usize,
    ) -> Result<&[u8], IFACE::Error>
    where
        IFACE: Mpu9250Interface,
    {
        let len = max_len.min(TRANSFER_BUFFER_SIZE);
        let received = interface
            .recv(&mut self.buffer[..len])
            .map_err(Error::Bridge)?
            .min(len);

        if received > 0 {
            log_debug!("bridge: received {=usize} bytes", received);
            self.pending = 0;
        }

        Ok(&self.buffer[..received])
    }
}

/// Exclusive handle on an attached driver's transfer bridge.
///
/// Obtained from [`Mpu9250::open`](crate::Mpu9250::open). While a session is
/// alive no other session can be opened and the driver cannot be
/// re-initialized, so a `write` can never interleave with another caller's `read`.
pub struct Session<'a, IFACE> {
    interface: &'a mut IFACE,
    bridge: &'a mut TransferBridge,
}

impl<'a, IFACE> Session<'a, IFACE>
where
    IFACE: Mpu9250Interface,
{
    pub(crate) fn new(interface: &'a mut IFACE, bridge: &'a mut TransferBridge) -> Self {
        let _count = bridge.record_open();
        log_info!("session opened ({=u32} time(s))", _count);
        Self { interface, bridge }
    }

    /// Forwards `bytes` to the bus. See [`TransferBridge::submit`].
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, IFACE::Error> {
        self.bridge.submit(&mut *self.interface, bytes).inspect_err(|_| {
            log_warn!("session write of {=usize} bytes failed", bytes.len());
        })
    }

    /// Reads up to `max_len` bytes from the bus. See [`TransferBridge::retrieve`].
    pub fn read(&mut self, max_len: usize) -> Result<&[u8], IFACE::Error> {
        self.bridge.retrieve(&mut *self.interface, max_len).inspect_err(|_| {
            log_warn!("session read of {=usize} bytes failed", max_len);
        })
    }

    /// Reads up to `out.len()` bytes and copies them into `out`, returning the count.
    pub fn read_into(&mut self, out: &mut [u8]) -> Result<usize, IFACE::Error> {
        let received = self.read(out.len())?;
        let count = received.len();
        out[..count].copy_from_slice(received);
        Ok(count)
    }

    /// Bytes staged by the last write and not yet cleared by a read.
    pub fn pending(&self) -> usize {
        self.bridge.pending()
    }

    /// Number of sessions opened on this driver, including this one.
    pub fn open_count(&self) -> u32 {
        self.bridge.open_count()
    }

    /// Ends the session.
    pub fn close(self) {
        log_info!("session closed");
    }
}
