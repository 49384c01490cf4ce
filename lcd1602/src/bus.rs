//! Transport boundary between the protocol core and the physical bus.

use crate::LcdResult;
use std::fmt::Debug;

/// A point-to-point bus that can write single bytes to a register of an
/// addressed device.
///
/// This is the only operation the driver needs: the PCF8574 expander has a
/// single output port, reached as register 0. Implementations wrap whatever
/// I2C plumbing the platform provides and map their failures through
/// `From<std::io::Error>` or directly into [`crate::LcdError::Bus`].
pub trait RegisterBus: Debug {
    /// Writes `value` to `register` of the device at `address`.
    fn write_register_byte(&mut self, address: u8, register: u8, value: u8) -> LcdResult<()>;
}
