//! Driver for HD44780-compatible character LCD modules wired behind a
//! single-byte I2C GPIO expander (PCF8574-style "backpack").
//!
//! The expander exposes one 8-bit output port; the controller hangs off it in
//! 4-bit mode with no read line, so the driver keeps a software mirror of the
//! display configuration and times every transfer with fixed delays instead of
//! polling the busy flag.
//!
//! The physical bus is abstracted behind [`bus::RegisterBus`]; anything that
//! can write one byte to register 0 of an addressed device will do.

pub mod bus;
pub mod driver;
pub mod options;
pub mod pins;

mod commands;

pub use driver::Lcd1602;
pub use options::Opts;

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    /// The configured slave address is outside the range the expander can
    /// be strapped to.
    #[error("address {0:#04x} is not supported by the device")]
    InvalidAddress(u8),
    /// A requested position does not exist on the configured display.
    #[error("position line {line} col {col} is outside the {lines}x{cols} display")]
    PositionOutOfRange {
        line: u8,
        col: u8,
        lines: u8,
        cols: u8,
    },
    /// The underlying bus write failed. The controller may be mid-nibble;
    /// the driver state is no longer trustworthy and the device should be
    /// reinitialized.
    #[error("bus write failed: {0}")]
    Bus(std::io::ErrorKind),
}

impl From<std::io::Error> for LcdError {
    fn from(err: std::io::Error) -> Self {
        LcdError::Bus(err.kind())
    }
}

pub type LcdResult<T> = Result<T, LcdError>;
