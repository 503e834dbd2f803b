//! Capability traits shared across instruction variants.
//!
//! A capability is a property several unrelated variants have in common
//! (pushing a value, being typed, reading the constant pool, ...). Visitors
//! receive variants through these traits, so a pass that only cares about,
//! say, stack producers never has to name a concrete instruction.

use core::fmt;

use crate::constant_pool::ConstantSource;
use crate::error::ResolveError;
use crate::instruction::InstructionKind;
use crate::types::Type;

/// Pushes values onto the operand stack.
pub trait StackProducer: InstructionKind {
    /// Number of stack words pushed.
    fn produce_stack(&self) -> usize;
}

/// Pops values off the operand stack.
pub trait StackConsumer: InstructionKind {
    /// Number of stack words popped.
    fn consume_stack(&self) -> usize;
}

/// Pushes exactly one value without consuming any.
pub trait PushInstruction: StackProducer {}

/// Pops exactly one value without producing any.
pub trait PopInstruction: StackConsumer {}

/// The value pushed or stored has a static type.
pub trait TypedInstruction: InstructionKind {
    /// Static type, possibly resolved through the constant pool.
    fn ty(&self, pool: &dyn ConstantSource) -> Result<Type, ResolveError>;
}

/// Pushes a literal known at compile time.
pub trait ConstantPushInstruction: PushInstruction + TypedInstruction {
    fn value(&self) -> i32;
}

/// Refers to a constant pool entry.
pub trait CpInstruction: TypedInstruction {
    fn index(&self) -> u16;
}

/// Reads or writes a local variable slot.
pub trait LocalVariableInstruction: TypedInstruction {
    fn slot(&self) -> u16;
}

/// Pops the stack top into a local variable slot.
pub trait StoreInstruction: LocalVariableInstruction + PopInstruction {}

/// Runtime failure an instruction may raise when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrownException {
    /// A symbolic reference in the constant pool could not be resolved.
    SymbolicResolution,
}

impl fmt::Display for ThrownException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThrownException::SymbolicResolution => f.write_str("symbolic resolution failure"),
        }
    }
}

/// May raise a runtime exception when executed.
pub trait ExceptionThrower: InstructionKind {
    fn exceptions(&self) -> &'static [ThrownException];
}
