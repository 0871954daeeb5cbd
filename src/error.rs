//! Error handling primitives for the MPU-9250 driver.

use crate::init::InitStep;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The bus completed a transfer but moved zero bytes.
    NoTransfer,
    /// A register read back a different value than was written.
    VerifyMismatch {
        /// Register address that was written.
        register: u8,
        /// Value sent to the register.
        written: u8,
        /// Value read back from the register.
        read: u8,
    },
    /// `WHO_AM_I` returned a code outside the supported set, or could not be read (`None`).
    UnsupportedDevice(Option<u8>),
    /// An initialization step failed its verified write.
    StepFailed(InitStep),
    /// A transfer bridge request failed at the bus layer. The session stays usable.
    Bridge(E),
    /// The transfer bridge was requested before a successful initialization.
    NotReady,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

impl<E> Error<E> {
    /// Returns the failing initialization step, if this error aborted an attach at a step.
    pub fn step(&self) -> Option<InitStep> {
        match self {
            Self::StepFailed(step) => Some(*step),
            _ => None,
        }
    }

    /// Returns `true` for errors that leave the driver unusable until it is initialized again.
    pub fn is_attach_failure(&self) -> bool {
        matches!(self, Self::UnsupportedDevice(_) | Self::StepFailed(_))
    }
}
