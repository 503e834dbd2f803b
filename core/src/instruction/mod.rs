//! Instruction variants and the common encode/decode contract.
//!
//! # Instruction Format
//!
//! Every instruction starts with a one-byte opcode, optionally preceded by
//! a `wide` prefix and followed by operand bytes:
//!
//! ```text
//! ┌────────┬────────┬─────────────┐
//! │ [wide] │ opcode │ operands... │
//! └────────┴────────┴─────────────┘
//! ```
//!
//! `length()` counts all of it, prefix included, and always equals what
//! `encode` writes.

use core::fmt;

use crate::bytes::{ByteSequence, ByteSink};
use crate::constant_pool::ConstantSource;
use crate::error::{DecodeError, ResolveError};
use crate::opcode::Opcode;
use crate::options::DecodeOptions;
use crate::types::Type;
use crate::visitor::Visitor;

pub mod capability;
mod ldc;
mod push;
mod store;

pub use capability::{
    ConstantPushInstruction, CpInstruction, ExceptionThrower, LocalVariableInstruction,
    PopInstruction, PushInstruction, StackConsumer, StackProducer, StoreInstruction,
    ThrownException, TypedInstruction,
};
pub use ldc::{Ldc, LdcValue, MAX_COMPACT_INDEX};
pub use push::{Bipush, Iconst};
pub use store::{Fstore, LocalVariableOperand, SlotEncoding};

/// Contract shared by every instruction variant.
pub trait InstructionKind {
    fn opcode(&self) -> Opcode;

    /// Bytes occupied in the code array, including the opcode and any
    /// `wide` prefix.
    fn length(&self) -> usize;

    /// Write the opcode followed by operand bytes. Fails only if `sink`
    /// fails.
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        Self: Sized;

    /// Read operand bytes for `opcode`. The opcode byte (and the `wide`
    /// prefix, if `wide` is set) has already been consumed.
    fn decode(opcode: Opcode, bytes: &mut ByteSequence<'_>, wide: bool) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

/// Writes `name`, or `name[opcode](length)` in alternate (`{:#}`) mode.
pub(crate) fn write_head(f: &mut fmt::Formatter<'_>, opcode: Opcode, length: usize) -> fmt::Result {
    if f.alternate() {
        write!(f, "{}[{}]({})", opcode.mnemonic(), opcode.as_u8(), length)
    } else {
        f.write_str(opcode.mnemonic())
    }
}

/// Any instruction this core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `iconst_m1` .. `iconst_5`
    Iconst(Iconst),
    Bipush(Bipush),
    /// `ldc` / `ldc_w`
    Ldc(Ldc),
    /// `fstore`, `fstore_0` .. `fstore_3`, `wide fstore`
    Fstore(Fstore),
}

impl Instruction {
    /// Read one instruction, opcode included, accepting the `wide` prefix.
    pub fn read(bytes: &mut ByteSequence<'_>) -> Result<Self, DecodeError> {
        Self::read_with_options(bytes, &DecodeOptions::default())
    }

    /// Read one instruction, opcode included.
    ///
    /// On failure the source may have been partially consumed.
    pub fn read_with_options(
        bytes: &mut ByteSequence<'_>,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let start = bytes.position();
        let mut opcode = read_opcode(bytes)?;

        let wide = opcode == Opcode::Wide;
        if wide {
            if !options.allow_wide {
                return Err(DecodeError::IllegalWide {
                    opcode: Opcode::Wide.as_u8(),
                    offset: start,
                });
            }
            opcode = read_opcode(bytes)?;
            if opcode != Opcode::Fstore {
                return Err(DecodeError::IllegalWide {
                    opcode: opcode.as_u8(),
                    offset: start + 1,
                });
            }
        }

        Self::decode(opcode, bytes, wide)
    }

    /// Static type of the pushed or stored value.
    pub fn ty(&self, pool: &dyn ConstantSource) -> Result<Type, ResolveError> {
        match self {
            Instruction::Iconst(i) => i.ty(pool),
            Instruction::Bipush(i) => i.ty(pool),
            Instruction::Ldc(i) => i.ty(pool),
            Instruction::Fstore(i) => i.ty(pool),
        }
    }

    /// Stack words pushed.
    pub fn produce_stack(&self) -> usize {
        match self {
            Instruction::Iconst(_) | Instruction::Bipush(_) | Instruction::Ldc(_) => 1,
            Instruction::Fstore(_) => 0,
        }
    }

    /// Stack words popped.
    pub fn consume_stack(&self) -> usize {
        match self {
            Instruction::Iconst(_) | Instruction::Bipush(_) | Instruction::Ldc(_) => 0,
            Instruction::Fstore(_) => 1,
        }
    }

    /// Runtime exceptions executing this instruction may raise.
    pub fn exceptions(&self) -> &'static [ThrownException] {
        match self {
            Instruction::Ldc(i) => i.exceptions(),
            Instruction::Iconst(_) | Instruction::Bipush(_) | Instruction::Fstore(_) => &[],
        }
    }

    /// Call the visitor's capability visits, then the concrete visit.
    pub fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        match self {
            Instruction::Iconst(i) => i.accept(v),
            Instruction::Bipush(i) => i.accept(v),
            Instruction::Ldc(i) => i.accept(v),
            Instruction::Fstore(i) => i.accept(v),
        }
    }
}

fn read_opcode(bytes: &mut ByteSequence<'_>) -> Result<Opcode, DecodeError> {
    let offset = bytes.position();
    let byte = bytes.read_u8()?;
    Opcode::try_from(byte).map_err(|opcode| DecodeError::UnknownOpcode { opcode, offset })
}

impl InstructionKind for Instruction {
    fn opcode(&self) -> Opcode {
        match self {
            Instruction::Iconst(i) => i.opcode(),
            Instruction::Bipush(i) => i.opcode(),
            Instruction::Ldc(i) => i.opcode(),
            Instruction::Fstore(i) => i.opcode(),
        }
    }

    fn length(&self) -> usize {
        match self {
            Instruction::Iconst(i) => i.length(),
            Instruction::Bipush(i) => i.length(),
            Instruction::Ldc(i) => i.length(),
            Instruction::Fstore(i) => i.length(),
        }
    }

    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        match self {
            Instruction::Iconst(i) => i.encode(sink),
            Instruction::Bipush(i) => i.encode(sink),
            Instruction::Ldc(i) => i.encode(sink),
            Instruction::Fstore(i) => i.encode(sink),
        }
    }

    fn decode(opcode: Opcode, bytes: &mut ByteSequence<'_>, wide: bool) -> Result<Self, DecodeError> {
        if wide && opcode != Opcode::Fstore {
            return Err(DecodeError::IllegalWide {
                opcode: opcode.as_u8(),
                offset: bytes.position().saturating_sub(1),
            });
        }

        match opcode {
            Opcode::IconstM1
            | Opcode::Iconst0
            | Opcode::Iconst1
            | Opcode::Iconst2
            | Opcode::Iconst3
            | Opcode::Iconst4
            | Opcode::Iconst5 => Iconst::decode(opcode, bytes, wide).map(Self::Iconst),
            Opcode::Bipush => Bipush::decode(opcode, bytes, wide).map(Self::Bipush),
            Opcode::Ldc | Opcode::LdcW => Ldc::decode(opcode, bytes, wide).map(Self::Ldc),
            Opcode::Fstore
            | Opcode::Fstore0
            | Opcode::Fstore1
            | Opcode::Fstore2
            | Opcode::Fstore3 => Fstore::decode(opcode, bytes, wide).map(Self::Fstore),
            // A prefix is not an instruction on its own
            Opcode::Wide => Err(DecodeError::IllegalWide {
                opcode: opcode.as_u8(),
                offset: bytes.position().saturating_sub(1),
            }),
        }
    }
}

impl From<Iconst> for Instruction {
    fn from(i: Iconst) -> Self {
        Instruction::Iconst(i)
    }
}

impl From<Bipush> for Instruction {
    fn from(i: Bipush) -> Self {
        Instruction::Bipush(i)
    }
}

impl From<Ldc> for Instruction {
    fn from(i: Ldc) -> Self {
        Instruction::Ldc(i)
    }
}

impl From<Fstore> for Instruction {
    fn from(i: Fstore) -> Self {
        Instruction::Fstore(i)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Iconst(i) => fmt::Display::fmt(i, f),
            Instruction::Bipush(i) => fmt::Display::fmt(i, f),
            Instruction::Ldc(i) => fmt::Display::fmt(i, f),
            Instruction::Fstore(i) => fmt::Display::fmt(i, f),
        }
    }
}
