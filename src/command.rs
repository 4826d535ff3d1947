//! MultiTron control word encoding
//!
//! Every request to the tile hardware is a single 32-bit control word. The word
//! names the target tile, the operation, a reserved field and the scanline the
//! operation applies to.
//!
//! ## Bit Layout
//!
//! | Field    | Offset | Width |
//! |----------|--------|-------|
//! | Tile     | 0      | 7     |
//! | Opcode   | 7      | 5     |
//! | Reserved | 12     | 13    |
//! | Scanline | 25     | 7     |
//!
//! Encoding performs no validation. A value wider than its field bleeds into
//! the next one; keeping values in range is the caller's job.
//!
//! ## Example
//!
//! ```
//! use multitron::{ControlWord, Opcode};
//!
//! let word = ControlWord::new(3, Opcode::ReadLine, 0, 17);
//! assert_eq!(word.bits(), 3 | (2 << 7) | (17 << 25));
//! assert_eq!(word.tile(), 3);
//! assert_eq!(word.opcode(), Some(Opcode::ReadLine));
//! assert_eq!(word.scanline(), 17);
//! ```

/// Operations understood by the tile hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Power the grid on and report its dimensions (2-byte reply: cols, rows)
    PowerOn = 0x00,
    /// Power the grid off (no payload)
    PowerOff = 0x01,
    /// Read one scanline of one tile into the payload buffer
    ReadLine = 0x02,
    /// Write the payload buffer to one scanline of one tile
    WriteLine = 0x03,
}

impl Opcode {
    /// Decode a raw opcode field
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0x00 => Some(Self::PowerOn),
            0x01 => Some(Self::PowerOff),
            0x02 => Some(Self::ReadLine),
            0x03 => Some(Self::WriteLine),
            _ => None,
        }
    }
}

/// Bit offset of the tile index field
pub const TILE_SHIFT: u32 = 0;
/// Width of the tile index field in bits
pub const TILE_BITS: u32 = 7;
/// Bit offset of the opcode field
pub const OPCODE_SHIFT: u32 = 7;
/// Width of the opcode field in bits
pub const OPCODE_BITS: u32 = 5;
/// Bit offset of the reserved field
pub const RESERVED_SHIFT: u32 = 12;
/// Width of the reserved field in bits
pub const RESERVED_BITS: u32 = 13;
/// Bit offset of the scanline field
pub const SCANLINE_SHIFT: u32 = 25;
/// Width of the scanline field in bits
pub const SCANLINE_BITS: u32 = 7;

const fn field(bits: u32, shift: u32, width: u32) -> u32 {
    (bits >> shift) & ((1 << width) - 1)
}

/// A packed control word
///
/// Built fresh for each exchange and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlWord(u32);

impl ControlWord {
    /// Pack a command
    pub const fn new(tile: u32, opcode: Opcode, reserved: u32, scanline: u32) -> Self {
        Self(
            (tile << TILE_SHIFT)
                | ((opcode as u32) << OPCODE_SHIFT)
                | (reserved << RESERVED_SHIFT)
                | (scanline << SCANLINE_SHIFT),
        )
    }

    /// Command addressing one scanline of one tile
    pub const fn line(opcode: Opcode, tile: u32, scanline: u32) -> Self {
        Self::new(tile, opcode, 0, scanline)
    }

    /// Command with every field except the opcode cleared
    pub const fn system(opcode: Opcode) -> Self {
        Self::new(0, opcode, 0, 0)
    }

    /// Wrap a raw word received from elsewhere
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw 32-bit value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Tile index field
    pub const fn tile(self) -> u32 {
        field(self.0, TILE_SHIFT, TILE_BITS)
    }

    /// Raw opcode field
    pub const fn opcode_bits(self) -> u32 {
        field(self.0, OPCODE_SHIFT, OPCODE_BITS)
    }

    /// Decoded opcode, `None` for codes the driver never issues
    pub const fn opcode(self) -> Option<Opcode> {
        Opcode::from_bits(self.opcode_bits())
    }

    /// Reserved field
    pub const fn reserved(self) -> u32 {
        field(self.0, RESERVED_SHIFT, RESERVED_BITS)
    }

    /// Scanline field
    pub const fn scanline(self) -> u32 {
        field(self.0, SCANLINE_SHIFT, SCANLINE_BITS)
    }
}

impl From<ControlWord> for u32 {
    fn from(word: ControlWord) -> Self {
        word.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_land_at_documented_offsets() {
        assert_eq!(ControlWord::new(1, Opcode::PowerOn, 0, 0).bits(), 1);
        assert_eq!(ControlWord::new(0, Opcode::WriteLine, 0, 0).bits(), 3 << 7);
        assert_eq!(ControlWord::new(0, Opcode::PowerOn, 1, 0).bits(), 1 << 12);
        assert_eq!(ControlWord::new(0, Opcode::PowerOn, 0, 1).bits(), 1 << 25);
    }

    #[test]
    fn test_power_commands_only_carry_opcode() {
        assert_eq!(ControlWord::system(Opcode::PowerOn).bits(), 0);
        assert_eq!(ControlWord::system(Opcode::PowerOff).bits(), 1 << 7);
    }

    #[test]
    fn test_field_maxima_do_not_overlap() {
        let word = ControlWord::new(0x7F, Opcode::WriteLine, 0x1FFF, 0x7F);
        assert_eq!(word.bits(), u32::MAX ^ (0x1C << 7));
        assert_eq!(word.tile(), 0x7F);
        assert_eq!(word.opcode(), Some(Opcode::WriteLine));
        assert_eq!(word.reserved(), 0x1FFF);
        assert_eq!(word.scanline(), 0x7F);
    }

    #[test]
    fn test_oversized_tile_bleeds_into_opcode() {
        // 128 does not fit in 7 bits; the overflow is not masked
        let word = ControlWord::new(128, Opcode::PowerOn, 0, 0);
        assert_eq!(word.tile(), 0);
        assert_eq!(word.opcode(), Some(Opcode::PowerOff));
    }

    #[test]
    fn test_unknown_opcode_decodes_to_none() {
        let word = ControlWord::from_bits(0x1F << OPCODE_SHIFT);
        assert_eq!(word.opcode(), None);
        assert_eq!(word.opcode_bits(), 0x1F);
    }

    #[test]
    fn test_line_command() {
        let word = ControlWord::line(Opcode::ReadLine, 5, 9);
        assert_eq!(u32::from(word), 5 | (2 << 7) | (9 << 25));
        assert_eq!(word.reserved(), 0);
    }
}
