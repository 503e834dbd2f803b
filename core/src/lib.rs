//! JVM instruction core.
//!
//! A closed family of bytecode instructions that can be decoded from a code
//! array, re-encoded to bytes, typed against a constant pool, and dispatched
//! to a [`Visitor`](visitor::Visitor) for analysis passes.
//!
//! ```
//! use jinsn_core::bytes::ByteSequence;
//! use jinsn_core::instruction::{Bipush, Instruction, InstructionKind};
//!
//! let insn = Instruction::from(Bipush::new(-7));
//! let mut out = Vec::new();
//! insn.encode(&mut out).unwrap();
//! assert_eq!(out, [0x10, 0xF9]);
//!
//! let decoded = Instruction::read(&mut ByteSequence::new(&out)).unwrap();
//! assert_eq!(decoded, insn);
//! ```

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod analysis;
pub mod bytes;
pub mod code;
pub mod constant_pool;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod options;
pub mod types;
pub mod visitor;

pub use code::{Code, decode_code, disassemble, encode_code};
pub use constant_pool::{Constant, ConstantPool, ConstantSource, ConstantTag};
pub use error::{DecodeError, InstructionError, ResolveError};
pub use instruction::{Instruction, InstructionKind};
pub use opcode::Opcode;
pub use options::{DecodeOptions, DisassemblyOptions};
pub use types::{ObjectType, Type};
pub use visitor::Visitor;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_decode_wide_store() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
