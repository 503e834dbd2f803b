//! Errors raised by the instruction core.
//!
//! # Error Categories
//!
//! - **Construction errors** ([`InstructionError`]): a caller asked for a value
//!   the instruction set has no encoding for (e.g. `iconst 6`).
//!
//! - **Decode errors** ([`DecodeError`]): the byte source ran out, or held an
//!   opcode this core does not know. Every variant carries the byte offset
//!   where decoding failed so callers can point at it.
//!
//! - **Resolution errors** ([`ResolveError`]): a constant pool entry does not
//!   have a tag the instruction permits. With a well-formed pool these are
//!   unreachable and indicate corrupted input.
//!
//! Encoding has no error type of its own: it fails only when the byte sink
//! fails, and the sink's error is returned unchanged.

use thiserror::Error;

use crate::constant_pool::ConstantTag;

/// A value outside the encodable domain was requested at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InstructionError {
    /// `iconst` only exists for -1..=5.
    #[error("iconst can be used only for values between -1 and 5: {value}")]
    ValueOutOfRange { value: i32 },
}

/// Failure while decoding instructions from a byte source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The source was exhausted before all operand bytes were read.
    #[error("unexpected end of bytecode at offset {offset}: needed {needed} byte(s), {available} available")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The opcode byte does not name an instruction this core implements.
    #[error("unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    /// A `wide` prefix preceded an opcode that has no wide form, or wide
    /// decoding was disabled.
    #[error("illegal wide prefix before opcode 0x{opcode:02X} at offset {offset}")]
    IllegalWide { opcode: u8, offset: usize },

    /// The code array is longer than the configured maximum.
    #[error("code array of {length} bytes exceeds the maximum of {max}")]
    CodeTooLong { length: usize, max: usize },
}

impl DecodeError {
    /// Byte offset the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::UnexpectedEnd { offset, .. }
            | DecodeError::UnknownOpcode { offset, .. }
            | DecodeError::IllegalWide { offset, .. } => Some(*offset),
            DecodeError::CodeTooLong { .. } => None,
        }
    }
}

/// Failure while resolving an instruction's operand against a constant pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The index does not point at a live pool entry.
    #[error("no constant at index {index}")]
    MissingConstant { index: u16 },

    /// The entry's tag is not one the instruction can load.
    #[error("unknown or invalid constant type {tag:?} at {index}")]
    InvalidConstantType { index: u16, tag: ConstantTag },

    /// A String or Class entry points at something other than Utf8.
    #[error("constant at {index} should be {expected:?}, found {found:?}")]
    UnexpectedIndirection {
        index: u16,
        expected: ConstantTag,
        found: ConstantTag,
    },
}
