//! Mapping of logical controller signals onto bits of the expander port.

/// A logical signal on the expander's output port.
///
/// The bit layout matches the common PCF8574 LCD backpack wiring:
/// RS/RW/E/backlight on the low nibble, D4..D7 on the high nibble.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pin {
    RegisterSelect,
    ReadWrite,
    Enable,
    Backlight,
    Data4,
    Data5,
    Data6,
    Data7,
}

impl Pin {
    pub const ALL: [Pin; 8] = [
        Pin::RegisterSelect,
        Pin::ReadWrite,
        Pin::Enable,
        Pin::Backlight,
        Pin::Data4,
        Pin::Data5,
        Pin::Data6,
        Pin::Data7,
    ];

    /// Bit position of this signal in the port byte.
    pub fn bit(self) -> u8 {
        match self {
            Pin::RegisterSelect => 0,
            Pin::ReadWrite => 1,
            Pin::Enable => 2,
            Pin::Backlight => 3,
            Pin::Data4 => 4,
            Pin::Data5 => 5,
            Pin::Data6 => 6,
            Pin::Data7 => 7,
        }
    }
}

/// Sets or clears the bit for `pin` in `byte`, leaving the other seven bits
/// untouched.
pub fn set_pin(byte: u8, pin: Pin, on: bool) -> u8 {
    let mask = 1u8 << pin.bit();
    if on { byte | mask } else { byte & !mask }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pin_touches_only_its_own_bit() {
        for base in [0x00u8, 0xFF, 0x55, 0xAA] {
            for pin in Pin::ALL {
                for on in [false, true] {
                    let out = set_pin(base, pin, on);
                    let mask = 1u8 << pin.bit();
                    assert_eq!(out & mask != 0, on, "{pin:?} not driven to {on}");
                    assert_eq!(out & !mask, base & !mask, "{pin:?} disturbed other bits");
                }
            }
        }
    }

    #[test]
    fn set_pin_is_idempotent() {
        for pin in Pin::ALL {
            for on in [false, true] {
                let once = set_pin(0x3C, pin, on);
                assert_eq!(set_pin(once, pin, on), once);
            }
        }
    }

    #[test]
    fn pins_cover_all_eight_bits() {
        let mut byte = 0u8;
        for pin in Pin::ALL {
            byte = set_pin(byte, pin, true);
        }
        assert_eq!(byte, 0xFF);
    }
}
