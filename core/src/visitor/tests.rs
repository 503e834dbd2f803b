//! Recording visitor used to pin down the dispatch order.

use super::Visitor;
use crate::instruction::{
    Bipush, ConstantPushInstruction, CpInstruction, ExceptionThrower, Fstore, Iconst, Instruction,
    Ldc, LocalVariableInstruction, PopInstruction, PushInstruction, StackConsumer, StackProducer,
    StoreInstruction, TypedInstruction,
};
use crate::{ConstantPool, Type, Vec};
use pretty_assertions::assert_eq;

// === Recording visitor ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Push,
    Pop,
    StackProducer,
    StackConsumer,
    Typed,
    ConstantPush,
    ExceptionThrower,
    Cp,
    LocalVariable,
    Store,
    Bipush,
    Iconst,
    Ldc,
    Fstore,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Visitor for Recorder {
    fn visit_push_instruction(&mut self, _: &dyn PushInstruction) {
        self.calls.push(Call::Push);
    }
    fn visit_pop_instruction(&mut self, _: &dyn PopInstruction) {
        self.calls.push(Call::Pop);
    }
    fn visit_stack_producer(&mut self, _: &dyn StackProducer) {
        self.calls.push(Call::StackProducer);
    }
    fn visit_stack_consumer(&mut self, _: &dyn StackConsumer) {
        self.calls.push(Call::StackConsumer);
    }
    fn visit_typed_instruction(&mut self, _: &dyn TypedInstruction) {
        self.calls.push(Call::Typed);
    }
    fn visit_constant_push_instruction(&mut self, _: &dyn ConstantPushInstruction) {
        self.calls.push(Call::ConstantPush);
    }
    fn visit_exception_thrower(&mut self, _: &dyn ExceptionThrower) {
        self.calls.push(Call::ExceptionThrower);
    }
    fn visit_cp_instruction(&mut self, _: &dyn CpInstruction) {
        self.calls.push(Call::Cp);
    }
    fn visit_local_variable_instruction(&mut self, _: &dyn LocalVariableInstruction) {
        self.calls.push(Call::LocalVariable);
    }
    fn visit_store_instruction(&mut self, _: &dyn StoreInstruction) {
        self.calls.push(Call::Store);
    }
    fn visit_bipush(&mut self, _: &Bipush) {
        self.calls.push(Call::Bipush);
    }
    fn visit_iconst(&mut self, _: &Iconst) {
        self.calls.push(Call::Iconst);
    }
    fn visit_ldc(&mut self, _: &Ldc) {
        self.calls.push(Call::Ldc);
    }
    fn visit_fstore(&mut self, _: &Fstore) {
        self.calls.push(Call::Fstore);
    }
}

fn record(insn: impl Into<Instruction>) -> Vec<Call> {
    let mut recorder = Recorder::default();
    insn.into().accept(&mut recorder);
    recorder.calls
}

// === Tests ===

#[test]
fn test_bipush_order() {
    let expected = [
        Call::Push,
        Call::StackProducer,
        Call::Typed,
        Call::ConstantPush,
        Call::Bipush,
    ];
    // Same sequence on every dispatch
    for _ in 0..3 {
        assert_eq!(record(Bipush::new(9)), expected);
    }
}

#[test]
fn test_iconst_order() {
    assert_eq!(
        record(Iconst::Four),
        [
            Call::Push,
            Call::StackProducer,
            Call::Typed,
            Call::ConstantPush,
            Call::Iconst,
        ]
    );
}

#[test]
fn test_ldc_order() {
    assert_eq!(
        record(Ldc::new(300)),
        [
            Call::Push,
            Call::StackProducer,
            Call::Typed,
            Call::ExceptionThrower,
            Call::Cp,
            Call::Ldc,
        ]
    );
}

#[test]
fn test_fstore_visits_store_capabilities_first() {
    let expected = [
        Call::Pop,
        Call::StackConsumer,
        Call::Typed,
        Call::LocalVariable,
        Call::Store,
        Call::Fstore,
    ];
    assert_eq!(record(Fstore::new(1)), expected);
    assert_eq!(record(Fstore::new(1000)), expected);
}

#[test]
fn test_concrete_visit_is_always_last() {
    let code: [Instruction; 4] = [
        Bipush::new(0).into(),
        Iconst::Zero.into(),
        Ldc::new(1).into(),
        Fstore::new(0).into(),
    ];
    let concrete = [Call::Bipush, Call::Iconst, Call::Ldc, Call::Fstore];
    for insn in code {
        let calls = record(insn);
        let last = *calls.last().unwrap();
        assert!(concrete.contains(&last));
        assert_eq!(calls.iter().filter(|c| concrete.contains(c)).count(), 1);
    }
}

/// A visitor that only cares about one capability sees nothing else.
#[test]
fn test_partial_visitor() {
    #[derive(Default)]
    struct TypeCollector<'p> {
        pool: Option<&'p ConstantPool>,
        types: Vec<Type>,
    }

    impl Visitor for TypeCollector<'_> {
        fn visit_typed_instruction(&mut self, insn: &dyn TypedInstruction) {
            if let Some(pool) = self.pool {
                self.types.push(insn.ty(pool).unwrap());
            }
        }
    }

    let mut pool = ConstantPool::new();
    let s = pool.add_string("x");
    let code: [Instruction; 3] = [Bipush::new(1).into(), Ldc::new(s).into(), Fstore::new(5).into()];

    let mut collector = TypeCollector {
        pool: Some(&pool),
        types: Vec::new(),
    };
    for insn in &code {
        insn.accept(&mut collector);
    }
    assert_eq!(collector.types, [Type::Byte, Type::string(), Type::Float]);
}

#[test]
fn test_capability_views_expose_operands() {
    #[derive(Default)]
    struct Operands {
        values: Vec<i32>,
        indexes: Vec<u16>,
        slots: Vec<u16>,
    }

    impl Visitor for Operands {
        fn visit_constant_push_instruction(&mut self, insn: &dyn ConstantPushInstruction) {
            self.values.push(insn.value());
        }
        fn visit_cp_instruction(&mut self, insn: &dyn CpInstruction) {
            self.indexes.push(insn.index());
        }
        fn visit_local_variable_instruction(&mut self, insn: &dyn LocalVariableInstruction) {
            self.slots.push(insn.slot());
        }
    }

    let mut v = Operands::default();
    for insn in [
        Instruction::from(Iconst::M1),
        Bipush::new(-100).into(),
        Ldc::new(42).into(),
        Fstore::new(130).into(),
    ] {
        insn.accept(&mut v);
    }
    assert_eq!(v.values, [-1, -100]);
    assert_eq!(v.indexes, [42]);
    assert_eq!(v.slots, [130]);
}
