//! Writing analysis passes against the public visitor API.

use jinsn_core::instruction::{
    ExceptionThrower, LocalVariableInstruction, StoreInstruction, ThrownException,
};
use jinsn_core::{ConstantPool, DecodeOptions, Visitor, decode_code};
use pretty_assertions::assert_eq;

/// Collects the slots written by store instructions.
#[derive(Default)]
struct StoredSlots {
    pending: Option<u16>,
    slots: Vec<u16>,
}

impl Visitor for StoredSlots {
    fn visit_local_variable_instruction(&mut self, insn: &dyn LocalVariableInstruction) {
        self.pending = Some(insn.slot());
    }

    fn visit_store_instruction(&mut self, _insn: &dyn StoreInstruction) {
        // Local variable is always visited before store
        let slot = self.pending.take().unwrap();
        self.slots.push(slot);
    }
}

#[test]
fn store_pass_sees_every_slot() {
    // iconst_0, fstore_3, bipush 1, fstore 9, wide fstore 1000
    let bytes = [0x03, 0x46, 0x10, 0x01, 0x38, 0x09, 0xC4, 0x38, 0x03, 0xE8];
    let code = decode_code(&bytes, &DecodeOptions::default()).unwrap();

    let mut pass = StoredSlots::default();
    code.accept(&mut pass);
    assert_eq!(pass.slots, [3, 9, 1000]);
    assert_eq!(pass.pending, None);
}

#[test]
fn exception_pass_only_sees_ldc() {
    #[derive(Default)]
    struct Throwers(Vec<&'static [ThrownException]>);

    impl Visitor for Throwers {
        fn visit_exception_thrower(&mut self, insn: &dyn ExceptionThrower) {
            self.0.push(insn.exceptions());
        }
    }

    let mut pool = ConstantPool::new();
    let s = pool.add_string("s") as u8;
    let bytes = [0x12, s, 0x05, 0x13, 0x01, 0x00, 0x44];
    let code = decode_code(&bytes, &DecodeOptions::default()).unwrap();

    let mut pass = Throwers::default();
    code.accept(&mut pass);
    assert_eq!(pass.0.len(), 2);
    assert!(
        pass.0
            .iter()
            .all(|e| *e == [ThrownException::SymbolicResolution])
    );
}
