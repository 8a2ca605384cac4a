//! Command table for the 2.66inch (B) controller
//!
//! Every command is a single opcode byte sent with the DC pin low, followed by
//! zero or more argument bytes sent with the DC pin high.
//!
//! | Opcode | Name                     | Arguments                          |
//! |--------|--------------------------|------------------------------------|
//! | 0x10   | `DEEP_SLEEP`             | 1 byte, sleep mode                 |
//! | 0x11   | `DATA_ENTRY_MODE`        | 1 byte, address increment flags    |
//! | 0x12   | `SOFT_RESET`             | none                               |
//! | 0x20   | `MASTER_ACTIVATION`      | none                               |
//! | 0x21   | `DISPLAY_UPDATE_CONTROL` | 2 bytes, RAM option + source range |
//! | 0x24   | `WRITE_RAM_BLACK_WHITE`  | one full plane                     |
//! | 0x26   | `WRITE_RAM_RED`          | one full plane                     |
//! | 0x44   | `SET_RAM_X_RANGE`        | 2 bytes, start/end in byte units   |
//! | 0x45   | `SET_RAM_Y_RANGE`        | 4 bytes, 9-bit start/end           |
//! | 0x4E   | `SET_RAM_X_COUNTER`      | 1 byte                             |
//! | 0x4F   | `SET_RAM_Y_COUNTER`      | 2 bytes, 9-bit value               |
//!
//! ## Example
//!
//! ```
//! use epd2in66b::command::{CommandName, Opcode};
//!
//! assert_eq!(Opcode::SoftReset.code(), 0x12);
//! assert_eq!(Opcode::from_code(0x20), Some(Opcode::MasterActivation));
//!
//! let name = CommandName(0x4E);
//! let _ = name; // renders as "SET_RAM_X_COUNTER (0x4E)"
//! ```

use core::fmt;

use crate::color::Plane;

/// Opcodes understood by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Enter deep sleep (0x10)
    ///
    /// Only a hardware reset wakes the controller again.
    DeepSleep = 0x10,
    /// Data entry mode (0x11)
    ///
    /// Bit 0 selects X increment, bit 1 selects Y increment.
    DataEntryMode = 0x11,
    /// Software reset (0x12)
    ///
    /// Restores register defaults. BUSY is high until it completes.
    SoftReset = 0x12,
    /// Master activation (0x20)
    ///
    /// Runs the display update sequence and refreshes the panel from RAM.
    MasterActivation = 0x20,
    /// Display update control (0x21)
    DisplayUpdateControl = 0x21,
    /// Write black/white RAM (0x24)
    WriteRamBlackWhite = 0x24,
    /// Write red RAM (0x26)
    WriteRamRed = 0x26,
    /// RAM X address start/end (0x44)
    SetRamXRange = 0x44,
    /// RAM Y address start/end (0x45)
    SetRamYRange = 0x45,
    /// RAM X address counter (0x4E)
    SetRamXCounter = 0x4E,
    /// RAM Y address counter (0x4F)
    SetRamYCounter = 0x4F,
}

/// Opcode to name table, used for diagnostics only
const OPCODE_TABLE: [(Opcode, &str); 11] = [
    (Opcode::DeepSleep, "DEEP_SLEEP"),
    (Opcode::DataEntryMode, "DATA_ENTRY_MODE"),
    (Opcode::SoftReset, "SOFT_RESET"),
    (Opcode::MasterActivation, "MASTER_ACTIVATION"),
    (Opcode::DisplayUpdateControl, "DISPLAY_UPDATE_CONTROL"),
    (Opcode::WriteRamBlackWhite, "WRITE_RAM_BLACK_WHITE"),
    (Opcode::WriteRamRed, "WRITE_RAM_RED"),
    (Opcode::SetRamXRange, "SET_RAM_X_RANGE"),
    (Opcode::SetRamYRange, "SET_RAM_Y_RANGE"),
    (Opcode::SetRamXCounter, "SET_RAM_X_COUNTER"),
    (Opcode::SetRamYCounter, "SET_RAM_Y_COUNTER"),
];

impl Opcode {
    /// All opcodes in table order
    pub const ALL: [Opcode; 11] = [
        Opcode::DeepSleep,
        Opcode::DataEntryMode,
        Opcode::SoftReset,
        Opcode::MasterActivation,
        Opcode::DisplayUpdateControl,
        Opcode::WriteRamBlackWhite,
        Opcode::WriteRamRed,
        Opcode::SetRamXRange,
        Opcode::SetRamYRange,
        Opcode::SetRamXCounter,
        Opcode::SetRamYCounter,
    ];

    /// The byte sent on the wire
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Reverse lookup of an opcode by its byte value
    pub fn from_code(code: u8) -> Option<Self> {
        OPCODE_TABLE
            .iter()
            .find(|(opcode, _)| opcode.code() == code)
            .map(|(opcode, _)| *opcode)
    }

    /// Upper-case name as used in the controller datasheet
    pub fn name(self) -> &'static str {
        OPCODE_TABLE
            .iter()
            .find(|(opcode, _)| *opcode == self)
            .map_or("UNKNOWN", |(_, name)| *name)
    }

    /// RAM write command that selects the given plane
    pub const fn select_plane(plane: Plane) -> Self {
        match plane {
            Plane::BlackWhite => Opcode::WriteRamBlackWhite,
            Plane::RedWhite => Opcode::WriteRamRed,
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode.code()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.code())
    }
}

/// Renders a raw command byte for logs, e.g. `SOFT_RESET (0x12)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandName(pub u8);

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Opcode::from_code(self.0) {
            Some(opcode) => fmt::Display::fmt(&opcode, f),
            None => write!(f, "UNKNOWN (0x{:02X})", self.0),
        }
    }
}

// Argument bytes

/// Data entry mode: X increment, Y increment, X is the fast axis
pub const DATA_ENTRY_INCREMENT_XY: u8 = 0x03;

/// Display update control byte 1: black/white and red RAM used as-is
pub const UPDATE_CONTROL_RAM_NORMAL: u8 = 0x00;

/// Display update control byte 2: source outputs S8 to S167
pub const UPDATE_CONTROL_SOURCE_S8_S167: u8 = 0x80;

/// Mask for the RAM X end address (5 bits of byte units)
pub const RAM_X_END_MASK: u16 = 0x1F;

/// Mask for the high bit of a 9-bit RAM Y address
pub const RAM_Y_HIGH_MASK: u16 = 0x01;
