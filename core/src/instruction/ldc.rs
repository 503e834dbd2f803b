//! LDC - Push item from constant pool.
//!
//! The pool index decides the encoding: indexes that fit in a byte use
//! `ldc` (2 bytes), anything larger uses `ldc_w` (3 bytes). Opcode and
//! length are computed from the index on every read, so they can never go
//! stale after [`Ldc::set_index`].

use core::fmt;

use crate::bytes::{ByteSequence, ByteSink};
use crate::constant_pool::{Constant, ConstantSource, ConstantTag};
use crate::error::{DecodeError, ResolveError};
use crate::instruction::capability::{
    CpInstruction, ExceptionThrower, PushInstruction, StackProducer, ThrownException,
    TypedInstruction,
};
use crate::instruction::{InstructionKind, write_head};
use crate::opcode::Opcode;
use crate::types::{ObjectType, Type};
use crate::visitor::Visitor;
use crate::{String, ToString};

/// Largest index the compact `ldc` form can hold.
pub const MAX_COMPACT_INDEX: u16 = u8::MAX as u16;

/// Resolving any `ldc` constant may fail at link time.
const LDC_EXCEPTIONS: &[ThrownException] = &[ThrownException::SymbolicResolution];

/// Value an `ldc` pushes, resolved from the constant pool.
#[derive(Debug, Clone, PartialEq)]
pub enum LdcValue {
    Int(i32),
    Float(f32),
    String(String),
    Class(ObjectType),
}

impl fmt::Display for LdcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LdcValue::Int(v) => write!(f, "{}", v),
            LdcValue::Float(v) => write!(f, "{:?}f", v),
            LdcValue::String(s) => write!(f, "{:?}", s),
            LdcValue::Class(c) => write!(f, "{}.class", c),
        }
    }
}

/// Stack: [...] -> [..., item]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ldc {
    index: u16,
    /// Read as `ldc_w` although the index fits in a byte.
    forced_wide: bool,
}

impl Ldc {
    pub const fn new(index: u16) -> Self {
        Self {
            index,
            forced_wide: false,
        }
    }

    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Point at a different pool entry, e.g. after merging pools.
    ///
    /// The encoding is recomputed from the new index.
    pub fn set_index(&mut self, index: u16) {
        if index > MAX_COMPACT_INDEX && !self.is_wide() {
            tracing::debug!(old = self.index, new = index, "ldc widened to ldc_w");
        }
        self.index = index;
        self.forced_wide = false;
    }

    pub const fn is_wide(&self) -> bool {
        self.forced_wide || self.index > MAX_COMPACT_INDEX
    }

    /// Decode the `ldc_w` form: a two-byte index.
    ///
    /// An `ldc_w` whose index fits in a byte stays `ldc_w`, so it encodes
    /// back to the three bytes it was read from.
    pub fn decode_wide(bytes: &mut ByteSequence<'_>) -> Result<Self, DecodeError> {
        let index = bytes.read_u16()?;
        let forced_wide = index <= MAX_COMPACT_INDEX;
        if forced_wide {
            tracing::debug!(index, "ldc_w with small index kept wide");
        }
        Ok(Self { index, forced_wide })
    }

    /// Value of the referenced constant.
    pub fn value(&self, pool: &dyn ConstantSource) -> Result<LdcValue, ResolveError> {
        match pool.constant(self.index)? {
            Constant::String { string_index } => {
                Ok(LdcValue::String(pool.utf8_at(*string_index)?.to_string()))
            }
            Constant::Float(v) => Ok(LdcValue::Float(*v)),
            Constant::Integer(v) => Ok(LdcValue::Int(*v)),
            Constant::Class { name_index } => {
                Ok(LdcValue::Class(ObjectType::new(pool.utf8_at(*name_index)?)))
            }
            other => Err(self.invalid(other.tag())),
        }
    }

    /// Static type of the referenced constant.
    pub fn ty(&self, pool: &dyn ConstantSource) -> Result<Type, ResolveError> {
        match pool.constant(self.index)?.tag() {
            ConstantTag::String => Ok(Type::string()),
            ConstantTag::Float => Ok(Type::Float),
            ConstantTag::Integer => Ok(Type::Int),
            ConstantTag::Class => Ok(Type::class()),
            tag => Err(self.invalid(tag)),
        }
    }

    pub fn exceptions(&self) -> &'static [ThrownException] {
        LDC_EXCEPTIONS
    }

    fn invalid(&self, tag: ConstantTag) -> ResolveError {
        ResolveError::InvalidConstantType {
            index: self.index,
            tag,
        }
    }

    pub fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        v.visit_push_instruction(self);
        v.visit_stack_producer(self);
        v.visit_typed_instruction(self);
        v.visit_exception_thrower(self);
        v.visit_cp_instruction(self);
        v.visit_ldc(self);
    }
}

impl InstructionKind for Ldc {
    fn opcode(&self) -> Opcode {
        if self.is_wide() { Opcode::LdcW } else { Opcode::Ldc }
    }

    fn length(&self) -> usize {
        if self.is_wide() { 3 } else { 2 }
    }

    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_u8(self.opcode().as_u8())?;
        if self.is_wide() {
            sink.write_u16(self.index)
        } else {
            sink.write_u8(self.index as u8)
        }
    }

    fn decode(opcode: Opcode, bytes: &mut ByteSequence<'_>, _wide: bool) -> Result<Self, DecodeError> {
        match opcode {
            Opcode::Ldc => Ok(Self::new(u16::from(bytes.read_u8()?))),
            Opcode::LdcW => Self::decode_wide(bytes),
            _ => Err(DecodeError::UnknownOpcode {
                opcode: opcode.as_u8(),
                offset: bytes.position().saturating_sub(1),
            }),
        }
    }
}

impl StackProducer for Ldc {
    fn produce_stack(&self) -> usize {
        1
    }
}

impl PushInstruction for Ldc {}

impl TypedInstruction for Ldc {
    fn ty(&self, pool: &dyn ConstantSource) -> Result<Type, ResolveError> {
        Ldc::ty(self, pool)
    }
}

impl ExceptionThrower for Ldc {
    fn exceptions(&self) -> &'static [ThrownException] {
        LDC_EXCEPTIONS
    }
}

impl CpInstruction for Ldc {
    fn index(&self) -> u16 {
        self.index
    }
}

impl fmt::Display for Ldc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_head(f, self.opcode(), self.length())?;
        write!(f, " {}", self.index)
    }
}

#[cfg(test)]
#[path = "ldc_test.rs"]
mod ldc_test;
