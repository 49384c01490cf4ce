//! HD44780 instruction bytes and their option bits.

pub(crate) const CMD_CLEAR_DISPLAY: u8 = 0x01;
pub(crate) const CMD_RETURN_HOME: u8 = 0x02;
pub(crate) const CMD_ENTRY_MODE: u8 = 0x04;
pub(crate) const CMD_DISPLAY_CONTROL: u8 = 0x08;
pub(crate) const CMD_CURSOR_DISPLAY_SHIFT: u8 = 0x10;
pub(crate) const CMD_FUNCTION_SET: u8 = 0x20;
pub(crate) const CMD_DDRAM_SET: u8 = 0x80;

// CMD_ENTRY_MODE
pub(crate) const OPT_INCREMENT: u8 = 0x02;
pub(crate) const OPT_ENTRY_SHIFT: u8 = 0x01;

// CMD_DISPLAY_CONTROL
pub(crate) const OPT_ENABLE_DISPLAY: u8 = 0x04;
pub(crate) const OPT_ENABLE_CURSOR: u8 = 0x02;
pub(crate) const OPT_ENABLE_BLINK: u8 = 0x01;

// CMD_CURSOR_DISPLAY_SHIFT
pub(crate) const OPT_DISPLAY_SHIFT: u8 = 0x08;
pub(crate) const OPT_SHIFT_RIGHT: u8 = 0x04; // 0 = left

// CMD_FUNCTION_SET
pub(crate) const OPT_TWO_LINES: u8 = 0x08; // 0 = 1 line
