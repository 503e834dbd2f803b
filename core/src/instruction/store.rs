//! Local-variable store instructions.
//!
//! Typed stores share a single operand representation,
//! [`LocalVariableOperand`], which knows how to pick between the compact
//! per-slot opcodes (`fstore_0` .. `fstore_3`), the generic opcode with a
//! one-byte slot, and the `wide`-prefixed form with a two-byte slot.

use core::fmt;

use crate::bytes::{ByteSequence, ByteSink};
use crate::constant_pool::ConstantSource;
use crate::error::{DecodeError, ResolveError};
use crate::instruction::capability::{
    LocalVariableInstruction, PopInstruction, StackConsumer, StoreInstruction, TypedInstruction,
};
use crate::instruction::{InstructionKind, write_head};
use crate::opcode::Opcode;
use crate::types::Type;
use crate::visitor::Visitor;

/// How a local variable slot is laid out in the code array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotEncoding {
    /// `[xstore_n]`, slot 0..=3 folded into the opcode
    Compact,
    /// `[xstore][u8]`
    Byte,
    /// `[wide][xstore][u16]`
    Wide,
}

impl SlotEncoding {
    /// Smallest encoding able to hold `slot`.
    pub fn for_slot(slot: u16) -> Self {
        match slot {
            0..=3 => SlotEncoding::Compact,
            4..=255 => SlotEncoding::Byte,
            _ => SlotEncoding::Wide,
        }
    }

    pub fn length(self) -> usize {
        match self {
            SlotEncoding::Compact => 1,
            SlotEncoding::Byte => 2,
            SlotEncoding::Wide => 4,
        }
    }
}

/// Slot operand shared by the typed store instructions.
///
/// `generic` is the opcode taking an explicit slot (`fstore`), `compact`
/// the four per-slot opcodes (`fstore_0` .. `fstore_3`).
///
/// Constructing from a slot picks the smallest encoding. Decoding keeps the
/// encoding that was actually read, so a re-encoded instruction is
/// byte-identical to its source and `length` always matches what was
/// consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalVariableOperand {
    generic: Opcode,
    compact: [Opcode; 4],
    slot: u16,
    encoding: SlotEncoding,
}

impl LocalVariableOperand {
    pub fn new(generic: Opcode, compact: [Opcode; 4], slot: u16) -> Self {
        Self {
            generic,
            compact,
            slot,
            encoding: SlotEncoding::for_slot(slot),
        }
    }

    pub fn slot(&self) -> u16 {
        self.slot
    }

    pub fn encoding(&self) -> SlotEncoding {
        self.encoding
    }

    pub fn is_wide(&self) -> bool {
        self.encoding == SlotEncoding::Wide
    }

    pub fn opcode(&self) -> Opcode {
        match self.encoding {
            SlotEncoding::Compact => self.compact[usize::from(self.slot)],
            SlotEncoding::Byte | SlotEncoding::Wide => self.generic,
        }
    }

    pub fn length(&self) -> usize {
        self.encoding.length()
    }

    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        match self.encoding {
            SlotEncoding::Compact => sink.write_u8(self.opcode().as_u8()),
            SlotEncoding::Byte => {
                sink.write_u8(self.generic.as_u8())?;
                // Byte encoding only ever holds slots <= 255
                sink.write_u8(self.slot as u8)
            }
            SlotEncoding::Wide => {
                sink.write_u8(Opcode::Wide.as_u8())?;
                sink.write_u8(self.generic.as_u8())?;
                sink.write_u16(self.slot)
            }
        }
    }

    /// Decode the slot for `opcode`, which the caller has already consumed
    /// (together with the `wide` prefix when `wide` is set).
    pub fn decode(
        generic: Opcode,
        compact: [Opcode; 4],
        opcode: Opcode,
        bytes: &mut ByteSequence<'_>,
        wide: bool,
    ) -> Result<Self, DecodeError> {
        let (slot, encoding) = if let Some(n) = compact.iter().position(|op| *op == opcode) {
            if wide {
                return Err(DecodeError::IllegalWide {
                    opcode: opcode.as_u8(),
                    offset: bytes.position().saturating_sub(1),
                });
            }
            (n as u16, SlotEncoding::Compact)
        } else if opcode != generic {
            return Err(DecodeError::UnknownOpcode {
                opcode: opcode.as_u8(),
                offset: bytes.position().saturating_sub(1),
            });
        } else if wide {
            (bytes.read_u16()?, SlotEncoding::Wide)
        } else {
            (u16::from(bytes.read_u8()?), SlotEncoding::Byte)
        };

        Ok(Self {
            generic,
            compact,
            slot,
            encoding,
        })
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_head(f, self.opcode(), self.length())?;
        match self.encoding {
            SlotEncoding::Compact => Ok(()),
            SlotEncoding::Byte | SlotEncoding::Wide => write!(f, " {}", self.slot),
        }
    }
}

// ============================================================================
// fstore
// ============================================================================

const FSTORE_COMPACT: [Opcode; 4] = [
    Opcode::Fstore0,
    Opcode::Fstore1,
    Opcode::Fstore2,
    Opcode::Fstore3,
];

/// FSTORE - Store float into local variable
///
/// Stack: [..., value: float] -> [...]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fstore {
    operand: LocalVariableOperand,
}

impl Fstore {
    pub fn new(slot: u16) -> Self {
        Self {
            operand: LocalVariableOperand::new(Opcode::Fstore, FSTORE_COMPACT, slot),
        }
    }

    pub fn slot(&self) -> u16 {
        self.operand.slot()
    }

    pub fn operand(&self) -> &LocalVariableOperand {
        &self.operand
    }

    /// Generic store visits first, then the float-specific one.
    pub fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        accept_store(self, v);
        v.visit_fstore(self);
    }
}

/// Capability visits every typed store makes before its concrete visit.
fn accept_store<T: StoreInstruction, V: Visitor + ?Sized>(insn: &T, v: &mut V) {
    v.visit_pop_instruction(insn);
    v.visit_stack_consumer(insn);
    v.visit_typed_instruction(insn);
    v.visit_local_variable_instruction(insn);
    v.visit_store_instruction(insn);
}

impl InstructionKind for Fstore {
    fn opcode(&self) -> Opcode {
        self.operand.opcode()
    }

    fn length(&self) -> usize {
        self.operand.length()
    }

    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        self.operand.encode(sink)
    }

    fn decode(opcode: Opcode, bytes: &mut ByteSequence<'_>, wide: bool) -> Result<Self, DecodeError> {
        let operand = LocalVariableOperand::decode(Opcode::Fstore, FSTORE_COMPACT, opcode, bytes, wide)?;
        Ok(Self { operand })
    }
}

impl StackConsumer for Fstore {
    fn consume_stack(&self) -> usize {
        1
    }
}

impl PopInstruction for Fstore {}

impl TypedInstruction for Fstore {
    fn ty(&self, _pool: &dyn ConstantSource) -> Result<Type, ResolveError> {
        Ok(Type::Float)
    }
}

impl LocalVariableInstruction for Fstore {
    fn slot(&self) -> u16 {
        self.operand.slot()
    }
}

impl StoreInstruction for Fstore {}

impl fmt::Display for Fstore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.operand.fmt_with(f)
    }
}
