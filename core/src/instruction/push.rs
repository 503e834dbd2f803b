//! Constant-push instructions: `bipush` and `iconst_<n>`.

use core::fmt;

use crate::bytes::{ByteSequence, ByteSink};
use crate::constant_pool::ConstantSource;
use crate::error::{DecodeError, InstructionError, ResolveError};
use crate::instruction::capability::{
    ConstantPushInstruction, PushInstruction, StackProducer, TypedInstruction,
};
use crate::instruction::{InstructionKind, write_head};
use crate::opcode::Opcode;
use crate::types::Type;
use crate::visitor::Visitor;

// ============================================================================
// bipush
// ============================================================================

/// BIPUSH - Push byte on stack
///
/// Layout: `[0x10][i8]` | Stack: [...] -> [..., value]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bipush {
    value: i8,
}

impl Bipush {
    pub const LENGTH: usize = 2;

    pub const fn new(value: i8) -> Self {
        Self { value }
    }

    /// The immediate, sign-extended.
    pub const fn value(&self) -> i32 {
        self.value as i32
    }

    pub fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        v.visit_push_instruction(self);
        v.visit_stack_producer(self);
        v.visit_typed_instruction(self);
        v.visit_constant_push_instruction(self);
        v.visit_bipush(self);
    }
}

impl InstructionKind for Bipush {
    fn opcode(&self) -> Opcode {
        Opcode::Bipush
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_u8(Opcode::Bipush.as_u8())?;
        sink.write_i8(self.value)
    }

    fn decode(opcode: Opcode, bytes: &mut ByteSequence<'_>, _wide: bool) -> Result<Self, DecodeError> {
        if opcode != Opcode::Bipush {
            return Err(DecodeError::UnknownOpcode {
                opcode: opcode.as_u8(),
                offset: bytes.position().saturating_sub(1),
            });
        }
        Ok(Self::new(bytes.read_i8()?))
    }
}

impl StackProducer for Bipush {
    fn produce_stack(&self) -> usize {
        1
    }
}

impl PushInstruction for Bipush {}

impl TypedInstruction for Bipush {
    fn ty(&self, _pool: &dyn ConstantSource) -> Result<Type, ResolveError> {
        Ok(Type::Byte)
    }
}

impl ConstantPushInstruction for Bipush {
    fn value(&self) -> i32 {
        Bipush::value(self)
    }
}

impl fmt::Display for Bipush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_head(f, Opcode::Bipush, Self::LENGTH)?;
        write!(f, " {}", self.value)
    }
}

// ============================================================================
// iconst_<n>
// ============================================================================

/// ICONST - Push value between -1, ..., 5
///
/// The value lives in the opcode itself, so there is no operand byte.
/// Layout: `[0x02..=0x08]` | Stack: [...] -> [..., value]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Iconst {
    M1 = 0,
    Zero = 1,
    One = 2,
    Two = 3,
    Three = 4,
    Four = 5,
    Five = 6,
}

/// Indexed by the `Iconst` discriminant.
const ICONST_TABLE: [(Iconst, i32, Opcode); 7] = [
    (Iconst::M1, -1, Opcode::IconstM1),
    (Iconst::Zero, 0, Opcode::Iconst0),
    (Iconst::One, 1, Opcode::Iconst1),
    (Iconst::Two, 2, Opcode::Iconst2),
    (Iconst::Three, 3, Opcode::Iconst3),
    (Iconst::Four, 4, Opcode::Iconst4),
    (Iconst::Five, 5, Opcode::Iconst5),
];

impl Iconst {
    pub const LENGTH: usize = 1;

    /// Fails for anything outside -1..=5; the instruction set has no
    /// `iconst` for other values.
    pub fn new(value: i32) -> Result<Self, InstructionError> {
        ICONST_TABLE
            .iter()
            .find(|(_, v, _)| *v == value)
            .map(|(iconst, _, _)| *iconst)
            .ok_or(InstructionError::ValueOutOfRange { value })
    }

    pub const fn value(&self) -> i32 {
        ICONST_TABLE[*self as usize].1
    }

    fn from_opcode(opcode: Opcode) -> Option<Self> {
        ICONST_TABLE
            .iter()
            .find(|(_, _, op)| *op == opcode)
            .map(|(iconst, _, _)| *iconst)
    }

    pub fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        v.visit_push_instruction(self);
        v.visit_stack_producer(self);
        v.visit_typed_instruction(self);
        v.visit_constant_push_instruction(self);
        v.visit_iconst(self);
    }
}

impl TryFrom<i32> for Iconst {
    type Error = InstructionError;

    fn try_from(value: i32) -> Result<Self, InstructionError> {
        Iconst::new(value)
    }
}

impl InstructionKind for Iconst {
    fn opcode(&self) -> Opcode {
        ICONST_TABLE[*self as usize].2
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_u8(self.opcode().as_u8())
    }

    fn decode(opcode: Opcode, bytes: &mut ByteSequence<'_>, _wide: bool) -> Result<Self, DecodeError> {
        Self::from_opcode(opcode).ok_or(DecodeError::UnknownOpcode {
            opcode: opcode.as_u8(),
            offset: bytes.position().saturating_sub(1),
        })
    }
}

impl StackProducer for Iconst {
    fn produce_stack(&self) -> usize {
        1
    }
}

impl PushInstruction for Iconst {}

impl TypedInstruction for Iconst {
    fn ty(&self, _pool: &dyn ConstantSource) -> Result<Type, ResolveError> {
        Ok(Type::Int)
    }
}

impl ConstantPushInstruction for Iconst {
    fn value(&self) -> i32 {
        Iconst::value(self)
    }
}

impl fmt::Display for Iconst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_head(f, self.opcode(), Self::LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConstantPool;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iconst_domain() {
        for v in -1..=5 {
            assert_eq!(Iconst::new(v).unwrap().value(), v);
        }
        assert_eq!(
            Iconst::new(6),
            Err(InstructionError::ValueOutOfRange { value: 6 })
        );
        assert_eq!(
            Iconst::new(-2),
            Err(InstructionError::ValueOutOfRange { value: -2 })
        );
    }

    #[test]
    fn test_iconst_error_names_value() {
        let err = Iconst::new(42).unwrap_err();
        assert_eq!(
            err.to_string(),
            "iconst can be used only for values between -1 and 5: 42"
        );
    }

    #[test]
    fn test_iconst_opcodes() {
        assert_eq!(Iconst::M1.opcode(), Opcode::IconstM1);
        assert_eq!(Iconst::Five.opcode(), Opcode::Iconst5);
        for v in -1..=5 {
            let insn = Iconst::new(v).unwrap();
            // Opcodes are consecutive starting at iconst_0
            assert_eq!(
                i32::from(insn.opcode().as_u8()),
                i32::from(Opcode::Iconst0.as_u8()) + v
            );
        }
    }

    #[test]
    fn test_iconst_decode_rejects_foreign_opcode() {
        let mut bytes = ByteSequence::new(&[]);
        assert!(Iconst::decode(Opcode::Bipush, &mut bytes, false).is_err());
    }

    #[test]
    fn test_bipush_decode_rejects_foreign_opcode() {
        let mut bytes = ByteSequence::new(&[0x05]);
        assert_eq!(
            Bipush::decode(Opcode::Iconst0, &mut bytes, false),
            Err(DecodeError::UnknownOpcode {
                opcode: 0x03,
                offset: 0
            })
        );
        // Nothing consumed
        assert_eq!(bytes.position(), 0);
    }

    #[test]
    fn test_bipush_extremes() {
        for v in [i8::MIN, -1, 0, 1, i8::MAX] {
            let insn = Bipush::new(v);
            let mut out = Vec::new();
            insn.encode(&mut out).unwrap();
            assert_eq!(out.len(), 2);
            assert_eq!(out.len(), insn.length());

            let mut bytes = ByteSequence::new(&out[1..]);
            let back = Bipush::decode(Opcode::Bipush, &mut bytes, false).unwrap();
            assert_eq!(back, insn);
            assert_eq!(back.value(), i32::from(v));
        }
    }

    #[test]
    fn test_bipush_value_is_widened() {
        assert_eq!(Bipush::new(-128).value(), -128);
        assert_eq!(Bipush::new(127).value(), 127);
    }

    #[test]
    fn test_types_ignore_pool() {
        let pool = ConstantPool::new();
        assert_eq!(Bipush::new(1).ty(&pool), Ok(Type::Byte));
        assert_eq!(Iconst::Three.ty(&pool), Ok(Type::Int));
    }

    #[test]
    fn test_display() {
        assert_eq!(Bipush::new(-5).to_string(), "bipush -5");
        assert_eq!(format!("{:#}", Bipush::new(16)), "bipush[16](2) 16");
        assert_eq!(Iconst::M1.to_string(), "iconst_m1");
        assert_eq!(format!("{:#}", Iconst::Two), "iconst_2[5](1)");
    }

    #[test]
    fn test_bipush_decode_needs_operand() {
        let mut bytes = ByteSequence::new(&[]);
        assert_eq!(
            Bipush::decode(Opcode::Bipush, &mut bytes, false),
            Err(DecodeError::UnexpectedEnd {
                offset: 0,
                needed: 1,
                available: 0
            })
        );
    }
}
