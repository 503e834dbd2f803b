//! Summary passes over decoded code, built on [`Visitor`].

use hashbrown::HashMap;

use crate::instruction::{
    Bipush, ConstantPushInstruction, CpInstruction, ExceptionThrower, Fstore, Iconst,
    InstructionKind, Ldc, LocalVariableInstruction, StackConsumer, StackProducer, StoreInstruction,
};
use crate::opcode::Opcode;
use crate::visitor::Visitor;
use crate::Vec;

/// Counts instructions by opcode and by capability.
///
/// ```
/// use jinsn_core::analysis::InstructionStats;
/// use jinsn_core::{Code, Opcode};
/// use jinsn_core::instruction::{Fstore, Iconst};
///
/// let code = Code::from_instructions([Iconst::One.into(), Fstore::new(1).into()]);
/// let mut stats = InstructionStats::default();
/// code.accept(&mut stats);
/// assert_eq!(stats.opcode_count(Opcode::Fstore1), 1);
/// assert_eq!(stats.max_stack_delta(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstructionStats {
    by_opcode: HashMap<Opcode, usize>,
    pub instructions: usize,
    pub bytes: usize,
    pub constant_pushes: usize,
    pub pool_references: usize,
    pub exception_throwers: usize,
    pub stores: usize,
    pub words_pushed: usize,
    pub words_popped: usize,
    /// Highest local slot written, if any.
    pub max_local: Option<u16>,
    depth: isize,
    max_depth: isize,
}

impl InstructionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opcode_count(&self, opcode: Opcode) -> usize {
        self.by_opcode.get(&opcode).copied().unwrap_or(0)
    }

    /// Opcodes seen, most frequent first, ties by opcode value.
    pub fn opcodes(&self) -> Vec<(Opcode, usize)> {
        let mut counts: Vec<_> = self.by_opcode.iter().map(|(op, n)| (*op, *n)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }

    /// Deepest running stack effect along straight-line execution from an
    /// empty stack. Only meaningful for code without branches.
    pub fn max_stack_delta(&self) -> usize {
        self.max_depth.max(0) as usize
    }

    fn record(&mut self, insn: &impl InstructionKind) {
        *self.by_opcode.entry(insn.opcode()).or_insert(0) += 1;
        self.instructions += 1;
        self.bytes += insn.length();
    }
}

impl Visitor for InstructionStats {
    fn visit_stack_producer(&mut self, insn: &dyn StackProducer) {
        let words = insn.produce_stack();
        self.words_pushed += words;
        self.depth += words as isize;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn visit_stack_consumer(&mut self, insn: &dyn StackConsumer) {
        let words = insn.consume_stack();
        self.words_popped += words;
        self.depth -= words as isize;
    }

    fn visit_constant_push_instruction(&mut self, _insn: &dyn ConstantPushInstruction) {
        self.constant_pushes += 1;
    }

    fn visit_exception_thrower(&mut self, _insn: &dyn ExceptionThrower) {
        self.exception_throwers += 1;
    }

    fn visit_cp_instruction(&mut self, _insn: &dyn CpInstruction) {
        self.pool_references += 1;
    }

    fn visit_local_variable_instruction(&mut self, insn: &dyn LocalVariableInstruction) {
        self.max_local = self.max_local.max(Some(insn.slot()));
    }

    fn visit_store_instruction(&mut self, _insn: &dyn StoreInstruction) {
        self.stores += 1;
    }

    fn visit_bipush(&mut self, insn: &Bipush) {
        self.record(insn);
    }

    fn visit_iconst(&mut self, insn: &Iconst) {
        self.record(insn);
    }

    fn visit_ldc(&mut self, insn: &Ldc) {
        self.record(insn);
    }

    fn visit_fstore(&mut self, insn: &Fstore) {
        self.record(insn);
    }
}
