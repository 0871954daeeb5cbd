#![no_std]

mod error;
mod log;

pub mod bridge;
pub mod config;
pub mod device;
pub mod init;
pub mod interface;
pub mod link;
pub mod params;
pub mod registers;

pub use crate::bridge::{Session, TransferBridge, TRANSFER_BUFFER_SIZE};
pub use crate::device::Mpu9250;
pub use crate::error::{Error, Result};
pub use crate::init::{InitState, InitStep};
