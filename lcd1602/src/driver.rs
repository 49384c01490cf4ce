//! Protocol core for the HD44780 controller behind the expander.

use crate::bus::RegisterBus;
use crate::commands::*;
use crate::options::Opts;
use crate::pins::{Pin, set_pin};
use crate::{LcdError, LcdResult};
use log::{debug, trace};
use std::thread::sleep;
use std::time::Duration;

/// The expander's single output port.
const PORT_REGISTER: u8 = 0;

/// Enable setup/hold time. The controller latches on the enable high-to-low
/// edge; both holds must stay at or above the datasheet minimum.
const ENABLE_HOLD: Duration = Duration::from_micros(40);

/// Settle time after each power-on sync nibble. The datasheet minimums are
/// 4.1 ms for the first and 100 us for the rest; these are deliberately
/// generous because the controller may power up mid-operation.
const SYNC_DELAYS: [Duration; 3] = [
    Duration::from_millis(200),
    Duration::from_millis(100),
    Duration::from_millis(100),
];

/// Settle time after the switch to 4-bit mode.
const MODE_SWITCH_DELAY: Duration = Duration::from_millis(10);

/// DDRAM base address of each display line. Fixed by the controller's memory
/// layout: lines 1 and 3 share a row of DDRAM, as do 2 and 4.
const LINE_BASE: [u8; 4] = [0x00, 0x40, 0x10, 0x50];

/// Driver for one display.
///
/// The controller is write-only in this wiring, so every mode flag below is a
/// software mirror of the last commanded state. Flags are updated before the
/// write that applies them; after a bus failure the mirror can no longer be
/// trusted and the device should be constructed anew.
#[derive(Debug)]
pub struct Lcd1602<'a> {
    bus: &'a mut dyn RegisterBus,
    address: u8,
    opts: Opts,
    backlight: bool,
    display_on: bool,
    cursor_on: bool,
    cursor_blink: bool,
    shift_on_write: bool,
    shift_right: bool,
}

impl<'a> Lcd1602<'a> {
    /// Creates a driver and runs the power-on initialization sequence,
    /// leaving the controller in 4-bit, 2-line mode with a cleared display.
    ///
    /// Fails if the configured address is invalid or any bus write fails;
    /// in the latter case the controller state is undefined.
    pub fn new(bus: &'a mut dyn RegisterBus, opts: Opts) -> LcdResult<Self> {
        let address = opts.resolve_address()?;
        let mut lcd = Lcd1602 {
            bus,
            address,
            opts,
            backlight: false,
            display_on: true,
            cursor_on: true,
            cursor_blink: true,
            shift_on_write: false,
            shift_right: false,
        };
        lcd.init()?;
        Ok(lcd)
    }

    /// Forces the controller into 4-bit mode and programs the initial
    /// configuration.
    ///
    /// The controller has no reset line here and may power up in 8-bit mode
    /// or halfway through a nibble, so the 8-bit sync pattern is pulsed three
    /// times before switching the interface width.
    fn init(&mut self) -> LcdResult<()> {
        debug!("initializing display at {:#04x}", self.address);

        let mut sync = set_pin(0, Pin::Data4, true);
        sync = set_pin(sync, Pin::Data5, true);
        for delay in SYNC_DELAYS {
            self.pulse(sync)?;
            sleep(delay);
        }

        let four_bit = set_pin(sync, Pin::Data4, false);
        self.pulse(four_bit)?;
        sleep(MODE_SWITCH_DELAY);

        self.set_backlight(true)?;
        self.command(CMD_FUNCTION_SET | OPT_TWO_LINES)?;
        self.sync_display_switch()?;
        self.write_entry_mode()?;
        self.command(CMD_CLEAR_DISPLAY)?;

        debug!("display at {:#04x} ready", self.address);
        Ok(())
    }

    /// Blanks the display and turns the backlight off.
    pub fn shutdown(&mut self) -> LcdResult<()> {
        self.clear()?;
        self.set_backlight(false)
    }

    /// Clears the display and homes the cursor.
    pub fn clear(&mut self) -> LcdResult<()> {
        self.command(CMD_CLEAR_DISPLAY)
    }

    /// Moves the cursor to the home position.
    pub fn home(&mut self) -> LcdResult<()> {
        self.command(CMD_RETURN_HOME)
    }

    /// Maps a (line, column) position to its DDRAM address. Lines count from
    /// 1, columns from 0.
    ///
    /// The configured geometry is honored, but never beyond what the
    /// controller can address: the base table has four lines and DDRAM
    /// addresses are seven bits.
    pub fn ddram_address(&self, line: u8, col: u8) -> LcdResult<u8> {
        let out_of_range = || LcdError::PositionOutOfRange {
            line,
            col,
            lines: self.opts.lines,
            cols: self.opts.cols,
        };
        if line == 0
            || line > self.opts.lines
            || line > LINE_BASE.len() as u8
            || col > self.opts.cols
        {
            return Err(out_of_range());
        }
        LINE_BASE[(line - 1) as usize]
            .checked_add(col)
            .filter(|&address| address <= 0x7F)
            .ok_or_else(out_of_range)
    }

    /// Moves the cursor to the given position.
    pub fn set_position(&mut self, line: u8, col: u8) -> LcdResult<()> {
        let address = self.ddram_address(line, col)?;
        self.command(CMD_DDRAM_SET | address)
    }

    /// Writes one character at the current cursor position.
    pub fn write_char(&mut self, ch: u8) -> LcdResult<()> {
        self.send(ch, true)
    }

    /// Writes a buffer of characters, pausing the configured inter-character
    /// delay after each one.
    pub fn write_bytes(&mut self, buf: &[u8]) -> LcdResult<()> {
        for &ch in buf {
            self.send(ch, true)?;
            sleep(self.opts.char_delay);
        }
        Ok(())
    }

    /// Writes a string. Characters outside the controller's 8-bit character
    /// set will render as whatever its ROM maps them to.
    pub fn write_str(&mut self, text: &str) -> LcdResult<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Turns the backlight on or off.
    ///
    /// The backlight is wired straight to an expander pin, outside the 4-bit
    /// protocol, so this is a single raw port write with enable low.
    pub fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        debug!("setting backlight {}", if on { "on" } else { "off" });
        self.backlight = on;
        self.write_port(set_pin(0, Pin::Backlight, on))
    }

    /// Sets whether the whole display shifts after each character write.
    pub fn set_shift_on_write(&mut self, on: bool) -> LcdResult<()> {
        debug!("setting shift-on-write to {on}");
        self.shift_on_write = on;
        self.write_entry_mode()
    }

    /// Sets the entry direction: shift-right decrements the address after
    /// each write instead of incrementing it.
    pub fn set_shift_right(&mut self, on: bool) -> LcdResult<()> {
        debug!("setting shift-right to {on}");
        self.shift_right = on;
        self.write_entry_mode()
    }

    /// Turns the whole display on or off (contents are retained).
    pub fn set_display_enabled(&mut self, on: bool) -> LcdResult<()> {
        debug!("setting display to {on}");
        self.display_on = on;
        self.sync_display_switch()
    }

    /// Shows or hides the cursor.
    pub fn set_cursor_visible(&mut self, on: bool) -> LcdResult<()> {
        debug!("setting cursor visibility to {on}");
        self.cursor_on = on;
        self.sync_display_switch()
    }

    /// Enables or disables cursor blinking.
    pub fn set_cursor_blink(&mut self, on: bool) -> LcdResult<()> {
        debug!("setting cursor blink to {on}");
        self.cursor_blink = on;
        self.sync_display_switch()
    }

    /// Moves the cursor one position without touching display memory.
    /// One-shot; does not change the entry mode.
    pub fn cursor_shift(&mut self, right: bool) -> LcdResult<()> {
        debug!("shifting cursor {}", if right { "right" } else { "left" });
        let mut command = CMD_CURSOR_DISPLAY_SHIFT;
        if right {
            command |= OPT_SHIFT_RIGHT;
        }
        self.command(command)
    }

    /// Shifts the whole display contents one position. One-shot; does not
    /// change the entry mode.
    pub fn display_shift(&mut self, right: bool) -> LcdResult<()> {
        debug!("shifting display {}", if right { "right" } else { "left" });
        let mut command = CMD_CURSOR_DISPLAY_SHIFT | OPT_DISPLAY_SHIFT;
        if right {
            command |= OPT_SHIFT_RIGHT;
        }
        self.command(command)
    }

    /// Recomputes and transmits the entry-mode command from the current
    /// direction and shift flags.
    fn write_entry_mode(&mut self) -> LcdResult<()> {
        let mut command = CMD_ENTRY_MODE;
        if !self.shift_right {
            command |= OPT_INCREMENT;
        }
        if self.shift_on_write {
            command |= OPT_ENTRY_SHIFT;
        }
        self.command(command)
    }

    /// Recomputes and transmits the display-control command from the current
    /// display/cursor/blink flags.
    fn sync_display_switch(&mut self) -> LcdResult<()> {
        let mut command = CMD_DISPLAY_CONTROL;
        if self.display_on {
            command |= OPT_ENABLE_DISPLAY;
        }
        if self.cursor_on {
            command |= OPT_ENABLE_CURSOR;
        }
        if self.cursor_blink {
            command |= OPT_ENABLE_BLINK;
        }
        self.command(command)
    }

    fn command(&mut self, value: u8) -> LcdResult<()> {
        self.send(value, false)
    }

    /// Transmits one byte as two 4-bit nibbles, high nibble first.
    ///
    /// `rs` selects the data register; commands go out with register-select
    /// low. A failed write aborts immediately: the controller may be left
    /// mid-nibble and a blind retry could desynchronize it.
    fn send(&mut self, value: u8, rs: bool) -> LcdResult<()> {
        trace!("sending {value:#010b} rs={rs}");

        for nibble in [value >> 4, value & 0x0F] {
            let mut byte = 0u8;
            byte = set_pin(byte, Pin::Data4, nibble & 0x01 != 0);
            byte = set_pin(byte, Pin::Data5, nibble & 0x02 != 0);
            byte = set_pin(byte, Pin::Data6, nibble & 0x04 != 0);
            byte = set_pin(byte, Pin::Data7, nibble & 0x08 != 0);
            if rs {
                byte = set_pin(byte, Pin::RegisterSelect, true);
            }
            self.pulse(byte)?;
        }
        Ok(())
    }

    /// Presents `data` on the port and pulses the enable line so the
    /// controller latches it on the high-to-low edge.
    ///
    /// The trailing enable-low write returns the port to idle with the data
    /// still presented, satisfying the controller's hold time; do not drop it.
    fn pulse(&mut self, data: u8) -> LcdResult<()> {
        let data = set_pin(data, Pin::Backlight, self.backlight);
        self.write_port(data)?;
        sleep(ENABLE_HOLD);
        self.write_port(set_pin(data, Pin::Enable, true))?;
        sleep(ENABLE_HOLD);
        self.write_port(data)
    }

    fn write_port(&mut self, value: u8) -> LcdResult<()> {
        self.bus
            .write_register_byte(self.address, PORT_REGISTER, value)
    }
}
