//! jinsn - JVM bytecode instructions
//!
//! # Overview
//!
//! A small, strongly typed model of a family of JVM instructions
//! (`iconst_<n>`, `bipush`, `ldc`/`ldc_w`, `fstore`), with byte-exact
//! decoding and encoding, constant-pool typing, and visitor dispatch for
//! analysis passes. This crate is the `std` facade over `jinsn_core`: it
//! adds hex input and diagnostics rendering.
//!
//! # Quick Start
//!
//! ```
//! use jinsn::{DecodeOptions, DisassemblyOptions, disassemble_hex};
//!
//! let listing = disassemble_hex(
//!     "10 64 04 c4 38 01 2c",
//!     None,
//!     &DecodeOptions::default(),
//!     &DisassemblyOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(listing, "   0: bipush 100\n   2: iconst_1\n   3: fstore 300\n");
//! ```
//!
//! # Errors
//!
//! [`Error`] covers everything that can go wrong between hex text and a
//! listing. Render it with [`render_error`] to point at the failing byte:
//!
//! ```text
//! Error: unknown opcode 0x61 at offset 2
//!    ╭─[ <code>:1:7 ]
//!    │
//!  1 │ 10 64 61
//!    │       ─┬
//!    │        ╰── not an instruction
//! ───╯
//! ```

// Re-export public API from jinsn_core
pub use jinsn_core::{
    Code, Constant, ConstantPool, ConstantSource, ConstantTag, DecodeError, DecodeOptions,
    DisassemblyOptions, Instruction, InstructionError, InstructionKind, ObjectType, Opcode,
    ResolveError, Type, Visitor, decode_code, disassemble, encode_code,
};
pub use jinsn_core::{analysis, bytes, instruction, visitor};

mod error_renderer;
mod hex;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
pub use hex::{HexError, hex_dump, parse_hex};

/// Anything that can fail between hex text and a disassembly listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid hex input: {error}")]
    Hex { error: HexError, input: String },

    /// `code` is the array that failed to decode, kept for rendering.
    #[error("{error}")]
    Decode { error: DecodeError, code: Vec<u8> },
}

impl Error {
    pub fn hex(error: HexError, input: &str) -> Self {
        Error::Hex {
            error,
            input: input.to_string(),
        }
    }

    pub fn decode(error: DecodeError, code: &[u8]) -> Self {
        Error::Decode {
            error,
            code: code.to_vec(),
        }
    }
}

/// Decode a code array, keeping the bytes around for error rendering.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Code, Error> {
    decode_code(bytes, options).map_err(|error| Error::decode(error, bytes))
}

/// Parse `text` as hex, decode it, and render the listing.
pub fn disassemble_hex(
    text: &str,
    pool: Option<&dyn ConstantSource>,
    decode_options: &DecodeOptions,
    options: &DisassemblyOptions,
) -> Result<String, Error> {
    let bytes = parse_hex(text).map_err(|error| Error::hex(error, text))?;
    tracing::debug!(bytes = bytes.len(), "parsed hex input");
    let code = decode(&bytes, decode_options)?;
    Ok(disassemble(&code, pool, options))
}
