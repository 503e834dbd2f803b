//! Configuration options for decoding and disassembly.

/// Maximum size of a method's code array in the class-file format.
pub const MAX_CODE_LENGTH: usize = 65535;

/// Configuration options for decoding a code array.
///
/// # Example
///
/// ```
/// use jinsn_core::options::DecodeOptions;
///
/// let options = DecodeOptions {
///     allow_wide: false,
///     ..DecodeOptions::default()
/// };
/// assert_eq!(options.max_code_length, 65535);
/// ```
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Reject code arrays longer than this many bytes.
    ///
    /// Default: 65535
    pub max_code_length: usize,

    /// Accept the `wide` prefix.
    ///
    /// When false, a `wide` prefix is reported as
    /// [`DecodeError::IllegalWide`](crate::DecodeError::IllegalWide).
    ///
    /// Default: true
    pub allow_wide: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_code_length: MAX_CODE_LENGTH,
            allow_wide: true,
        }
    }
}

/// Configuration options for rendering a disassembly listing.
///
/// # Example
///
/// ```
/// use jinsn_core::options::DisassemblyOptions;
///
/// let options = DisassemblyOptions {
///     verbose: true,
///     ..DisassemblyOptions::default()
/// };
/// assert!(options.resolve_constants);
/// ```
#[derive(Debug, Clone)]
pub struct DisassemblyOptions {
    /// Render `name[opcode](length)` instead of the bare mnemonic.
    ///
    /// Default: false
    pub verbose: bool,

    /// Annotate `ldc` with the constant it loads when a pool is supplied.
    ///
    /// Default: true
    pub resolve_constants: bool,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            resolve_constants: true,
        }
    }
}
