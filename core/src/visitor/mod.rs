//! Visitor dispatch for instructions.
//!
//! Each variant's `accept` calls a fixed sequence of visitor methods:
//! capability visits first, the concrete visit last. Every method defaults
//! to a no-op, so a visitor only overrides what its pass needs.
//!
//! # Call Order
//!
//! | Variant | Sequence |
//! |---|---|
//! | `bipush` | push, stack producer, typed, constant push, `visit_bipush` |
//! | `iconst` | push, stack producer, typed, constant push, `visit_iconst` |
//! | `ldc` | push, stack producer, typed, exception thrower, cp, `visit_ldc` |
//! | `fstore` | pop, stack consumer, typed, local variable, store, `visit_fstore` |
//!
//! The order is part of the contract and never changes between calls.
//!
//! # Example
//!
//! ```
//! use jinsn_core::instruction::{Bipush, Iconst, Instruction, StackProducer};
//! use jinsn_core::visitor::Visitor;
//!
//! #[derive(Default)]
//! struct PushedWords(usize);
//!
//! impl Visitor for PushedWords {
//!     fn visit_stack_producer(&mut self, insn: &dyn StackProducer) {
//!         self.0 += insn.produce_stack();
//!     }
//! }
//!
//! let code: [Instruction; 2] = [Bipush::new(3).into(), Iconst::One.into()];
//! let mut counter = PushedWords::default();
//! for insn in &code {
//!     insn.accept(&mut counter);
//! }
//! assert_eq!(counter.0, 2);
//! ```

use crate::instruction::{
    Bipush, ConstantPushInstruction, CpInstruction, ExceptionThrower, Fstore, Iconst, Ldc,
    LocalVariableInstruction, PopInstruction, PushInstruction, StackConsumer, StackProducer,
    StoreInstruction, TypedInstruction,
};

/// Receives instructions during [`Instruction::accept`](crate::Instruction::accept).
pub trait Visitor {
    // ========================================================================
    // Capabilities
    // ========================================================================
    fn visit_push_instruction(&mut self, _insn: &dyn PushInstruction) {}

    fn visit_pop_instruction(&mut self, _insn: &dyn PopInstruction) {}

    fn visit_stack_producer(&mut self, _insn: &dyn StackProducer) {}

    fn visit_stack_consumer(&mut self, _insn: &dyn StackConsumer) {}

    fn visit_typed_instruction(&mut self, _insn: &dyn TypedInstruction) {}

    fn visit_constant_push_instruction(&mut self, _insn: &dyn ConstantPushInstruction) {}

    fn visit_exception_thrower(&mut self, _insn: &dyn ExceptionThrower) {}

    fn visit_cp_instruction(&mut self, _insn: &dyn CpInstruction) {}

    fn visit_local_variable_instruction(&mut self, _insn: &dyn LocalVariableInstruction) {}

    fn visit_store_instruction(&mut self, _insn: &dyn StoreInstruction) {}

    // ========================================================================
    // Concrete instructions
    // ========================================================================
    fn visit_bipush(&mut self, _insn: &Bipush) {}

    fn visit_iconst(&mut self, _insn: &Iconst) {}

    fn visit_ldc(&mut self, _insn: &Ldc) {}

    fn visit_fstore(&mut self, _insn: &Fstore) {}
}

#[cfg(test)]
mod tests;
