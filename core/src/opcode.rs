//! Opcode values for the instructions this core understands.
//!
//! Values are the JVM's own encodings. Opcodes are grouped the way the
//! class-file format groups them:
//!
//! ```text
//! 0x02 - 0x08   iconst_m1 .. iconst_5   value folded into the opcode
//! 0x10          bipush                  [op][i8]
//! 0x12 - 0x13   ldc, ldc_w              [op][u8] / [op][u16]
//! 0x38          fstore                  [op][u8]  (wide: [wide][op][u16])
//! 0x43 - 0x46   fstore_0 .. fstore_3    slot folded into the opcode
//! 0xC4          wide                    prefix
//! ```

use core::fmt;

/// A single-byte opcode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    // ========================================================================
    // Constants (0x02 - 0x13)
    // ========================================================================
    /// Push int -1
    IconstM1 = 0x02,
    /// Push int 0
    Iconst0 = 0x03,
    Iconst1 = 0x04,
    Iconst2 = 0x05,
    Iconst3 = 0x06,
    Iconst4 = 0x07,
    Iconst5 = 0x08,

    /// Push sign-extended byte
    /// Operand: i8 | Stack: [...] -> [..., int]
    Bipush = 0x10,

    /// Push item from constant pool (index 0-255)
    /// Operand: u8 index | Stack: [...] -> [..., item]
    Ldc = 0x12,

    /// Push item from constant pool (wide index)
    /// Operand: u16 index | Stack: [...] -> [..., item]
    LdcW = 0x13,

    // ========================================================================
    // Stores (0x38 - 0x46)
    // ========================================================================
    /// Store float into local variable
    /// Operand: u8 slot (u16 after `wide`) | Stack: [..., float] -> [...]
    Fstore = 0x38,

    /// Store float into local variable 0..3
    /// Stack: [..., float] -> [...]
    Fstore0 = 0x43,
    Fstore1 = 0x44,
    Fstore2 = 0x45,
    Fstore3 = 0x46,

    // ========================================================================
    // Prefixes (0xC4)
    // ========================================================================
    /// Extend the local variable index of the next instruction to 16 bits
    Wide = 0xC4,
}
static_assertions::assert_eq_size!(Opcode, u8);

impl Opcode {
    /// Every opcode, in ascending byte order.
    pub const ALL: [Opcode; 16] = [
        Opcode::IconstM1,
        Opcode::Iconst0,
        Opcode::Iconst1,
        Opcode::Iconst2,
        Opcode::Iconst3,
        Opcode::Iconst4,
        Opcode::Iconst5,
        Opcode::Bipush,
        Opcode::Ldc,
        Opcode::LdcW,
        Opcode::Fstore,
        Opcode::Fstore0,
        Opcode::Fstore1,
        Opcode::Fstore2,
        Opcode::Fstore3,
        Opcode::Wide,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lower-case mnemonic as printed by `javap`.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::IconstM1 => "iconst_m1",
            Opcode::Iconst0 => "iconst_0",
            Opcode::Iconst1 => "iconst_1",
            Opcode::Iconst2 => "iconst_2",
            Opcode::Iconst3 => "iconst_3",
            Opcode::Iconst4 => "iconst_4",
            Opcode::Iconst5 => "iconst_5",
            Opcode::Bipush => "bipush",
            Opcode::Ldc => "ldc",
            Opcode::LdcW => "ldc_w",
            Opcode::Fstore => "fstore",
            Opcode::Fstore0 => "fstore_0",
            Opcode::Fstore1 => "fstore_1",
            Opcode::Fstore2 => "fstore_2",
            Opcode::Fstore3 => "fstore_3",
            Opcode::Wide => "wide",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        Ok(match byte {
            0x02 => Opcode::IconstM1,
            0x03 => Opcode::Iconst0,
            0x04 => Opcode::Iconst1,
            0x05 => Opcode::Iconst2,
            0x06 => Opcode::Iconst3,
            0x07 => Opcode::Iconst4,
            0x08 => Opcode::Iconst5,
            0x10 => Opcode::Bipush,
            0x12 => Opcode::Ldc,
            0x13 => Opcode::LdcW,
            0x38 => Opcode::Fstore,
            0x43 => Opcode::Fstore0,
            0x44 => Opcode::Fstore1,
            0x45 => Opcode::Fstore2,
            0x46 => Opcode::Fstore3,
            0xC4 => Opcode::Wide,
            other => return Err(other),
        })
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
