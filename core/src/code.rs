//! Whole code arrays: decoding, encoding and disassembly listings.

use core::fmt::{self, Write as _};

use crate::bytes::{ByteSequence, ByteSink};
use crate::constant_pool::ConstantSource;
use crate::error::DecodeError;
use crate::instruction::{Instruction, InstructionKind};
use crate::options::{DecodeOptions, DisassemblyOptions};
use crate::visitor::Visitor;
use crate::{String, Vec};

/// Instructions of one method body, each with its byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    entries: Vec<(usize, Instruction)>,
}

impl Code {
    /// Lay out `instructions` back to back starting at offset 0.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        let mut offset = 0;
        let entries = instructions
            .into_iter()
            .map(|insn| {
                let at = offset;
                offset += insn.length();
                (at, insn)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total encoded size in bytes.
    pub fn byte_length(&self) -> usize {
        self.entries.iter().map(|(_, insn)| insn.length()).sum()
    }

    /// `(offset, instruction)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Instruction)> {
        self.entries.iter().map(|(offset, insn)| (*offset, insn))
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter().map(|(_, insn)| insn)
    }

    /// Instruction starting exactly at byte `offset`.
    pub fn at_offset(&self, offset: usize) -> Option<&Instruction> {
        self.entries
            .binary_search_by_key(&offset, |(at, _)| *at)
            .ok()
            .map(|i| &self.entries[i].1)
    }

    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        for (_, insn) in &self.entries {
            insn.encode(sink)?;
        }
        Ok(())
    }

    /// Dispatch every instruction to `visitor`, in code order.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for (_, insn) in &self.entries {
            insn.accept(visitor);
        }
    }
}

/// Decode a complete code array.
///
/// Offsets are those of the source bytes. Every entry's length is the
/// number of bytes it was read from, so re-encoding reproduces `bytes`.
pub fn decode_code(bytes: &[u8], options: &DecodeOptions) -> Result<Code, DecodeError> {
    if bytes.len() > options.max_code_length {
        return Err(DecodeError::CodeTooLong {
            length: bytes.len(),
            max: options.max_code_length,
        });
    }

    let mut seq = ByteSequence::new(bytes);
    let mut entries = Vec::new();
    while !seq.is_empty() {
        let offset = seq.position();
        let insn = Instruction::read_with_options(&mut seq, options)?;
        tracing::trace!(offset, %insn, "decoded");
        entries.push((offset, insn));
    }

    Ok(Code { entries })
}

/// Encode `instructions` back to back.
pub fn encode_code<S: ByteSink + ?Sized>(
    instructions: &[Instruction],
    sink: &mut S,
) -> Result<(), S::Error> {
    for insn in instructions {
        insn.encode(sink)?;
    }
    Ok(())
}

/// Render a listing, one instruction per line:
///
/// ```text
///    0: bipush 100
///    2: ldc 7  // "hello"
///    4: fstore_1
/// ```
pub fn disassemble(
    code: &Code,
    pool: Option<&dyn ConstantSource>,
    options: &DisassemblyOptions,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_listing(&mut out, code, pool, options);
    tracing::debug!(
        instructions = code.len(),
        bytes = code.byte_length(),
        "disassembled"
    );
    out
}

fn write_listing(
    out: &mut impl fmt::Write,
    code: &Code,
    pool: Option<&dyn ConstantSource>,
    options: &DisassemblyOptions,
) -> fmt::Result {
    for (offset, insn) in code.iter() {
        if options.verbose {
            write!(out, "{:4}: {:#}", offset, insn)?;
        } else {
            write!(out, "{:4}: {}", offset, insn)?;
        }

        if let (Instruction::Ldc(ldc), Some(pool), true) = (insn, pool, options.resolve_constants) {
            match ldc.value(pool) {
                Ok(value) => write!(out, "  // {}", value)?,
                Err(err) => write!(out, "  // <{}>", err)?,
            }
        }
        out.write_char('\n')?;
    }
    Ok(())
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = DisassemblyOptions {
            verbose: f.alternate(),
            ..DisassemblyOptions::default()
        };
        write_listing(f, self, None, &options)
    }
}

#[cfg(test)]
#[path = "code_test.rs"]
mod code_test;
