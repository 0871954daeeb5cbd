//! Scripted transport used by the unit tests.
//!
//! `embedded-hal` transfers are all-or-error, so short and zero-length
//! transfers can only be exercised through this hand-written transport.

extern crate std;

use std::vec::Vec;

use super::Mpu9250Interface;

/// Error returned by scripted transfers marked as failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reply {
    /// Report the full length (payload length for sends, data length for receives).
    Full,
    /// Report an explicit byte count.
    Count(usize),
    /// Fail the transfer.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expectation {
    Send { bytes: Vec<u8>, reply: Reply },
    Recv { len: usize, data: Vec<u8>, reply: Reply },
}

impl Expectation {
    pub(crate) fn send(bytes: &[u8]) -> Self {
        Self::Send {
            bytes: bytes.to_vec(),
            reply: Reply::Full,
        }
    }

    pub(crate) fn recv(len: usize, data: &[u8]) -> Self {
        Self::Recv {
            len,
            data: data.to_vec(),
            reply: Reply::Full,
        }
    }

    pub(crate) fn fail(self) -> Self {
        self.reply(Reply::Fail)
    }

    pub(crate) fn count(self, count: usize) -> Self {
        self.reply(Reply::Count(count))
    }

    fn reply(self, reply: Reply) -> Self {
        match self {
            Self::Send { bytes, .. } => Self::Send { bytes, reply },
            Self::Recv { len, data, .. } => Self::Recv { len, data, reply },
        }
    }
}

/// Address write followed by a one-byte read returning `value`.
pub(crate) fn register_read(register: u8, value: u8) -> [Expectation; 2] {
    [
        Expectation::send(&[register]),
        Expectation::recv(1, &[value]),
    ]
}

/// Frame write followed by a read-back returning `read_back`.
pub(crate) fn verified_write(register: u8, value: u8, read_back: u8) -> [Expectation; 3] {
    let [select, read] = register_read(register, read_back);
    [Expectation::send(&[register, value]), select, read]
}

/// Transport replaying an ordered list of expected transfers.
pub(crate) struct ScriptedBus {
    script: Vec<Expectation>,
    index: usize,
}

impl ScriptedBus {
    pub(crate) fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Expectation>,
    {
        Self {
            script: script.into_iter().collect(),
            index: 0,
        }
    }

    /// Number of transfers performed so far.
    pub(crate) fn performed(&self) -> usize {
        self.index
    }

    fn next(&mut self) -> Expectation {
        let expected = self
            .script
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| panic!("unexpected transfer #{}", self.index));
        self.index += 1;
        expected
    }
}

impl Drop for ScriptedBus {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            assert_eq!(
                self.index,
                self.script.len(),
                "not all scripted transfers consumed"
            );
        }
    }
}

impl Mpu9250Interface for ScriptedBus {
    type Error = BusFault;

    fn send(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        match self.next() {
            Expectation::Send {
                bytes: expected,
                reply,
            } => {
                assert_eq!(bytes, expected.as_slice(), "send payload mismatch");
                match reply {
                    Reply::Full => Ok(bytes.len()),
                    Reply::Count(count) => Ok(count),
                    Reply::Fail => Err(BusFault),
                }
            }
            other => panic!("expected {:?}, got send of {:?}", other, bytes),
        }
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.next() {
            Expectation::Recv { len, data, reply } => {
                assert_eq!(buf.len(), len, "receive length mismatch");
                buf[..data.len()].copy_from_slice(&data);
                match reply {
                    Reply::Full => Ok(data.len()),
                    Reply::Count(count) => Ok(count),
                    Reply::Fail => Err(BusFault),
                }
            }
            other => panic!("expected {:?}, got receive of {} bytes", other, buf.len()),
        }
    }
}
