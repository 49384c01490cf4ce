//! Construction-time device configuration.

use crate::{LcdError, LcdResult};
use std::time::Duration;

/// Address the expander answers at when all address straps are left open.
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Configuration for one display, fixed at construction.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Slave address of the expander. 0 means [`DEFAULT_ADDRESS`]; anything
    /// else must be within 0x20..=0x27, the range the chip can be strapped to.
    pub address: u8,
    /// How many lines the display has.
    pub lines: u8,
    /// How many columns the display has.
    pub cols: u8,
    /// Pause inserted between consecutive characters of a buffer write.
    pub char_delay: Duration,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            address: 0,
            lines: 2,
            cols: 16,
            char_delay: Duration::from_millis(1),
        }
    }
}

impl Opts {
    /// Resolves the configured address, applying the default and rejecting
    /// addresses the expander cannot be strapped to.
    pub(crate) fn resolve_address(&self) -> LcdResult<u8> {
        match self.address {
            0 => Ok(DEFAULT_ADDRESS),
            addr @ 0x20..=0x27 => Ok(addr),
            addr => Err(LcdError::InvalidAddress(addr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_resolves_to_default() {
        let opts = Opts::default();
        assert_eq!(opts.resolve_address(), Ok(DEFAULT_ADDRESS));
    }

    #[test]
    fn strapped_addresses_are_accepted() {
        for addr in 0x20..=0x27 {
            let opts = Opts {
                address: addr,
                ..Opts::default()
            };
            assert_eq!(opts.resolve_address(), Ok(addr));
        }
    }

    #[test]
    fn out_of_range_addresses_are_rejected() {
        for addr in [0x01u8, 0x1F, 0x28, 0x7F] {
            let opts = Opts {
                address: addr,
                ..Opts::default()
            };
            assert_eq!(opts.resolve_address(), Err(LcdError::InvalidAddress(addr)));
        }
    }
}
