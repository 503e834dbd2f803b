use jinsn::{DecodeOptions, DisassemblyOptions, disassemble_hex};

/// Disassemble `input` with default options; errors become their message.
pub fn listing(input: &str) -> Result<String, String> {
    disassemble_hex(
        input,
        None,
        &DecodeOptions::default(),
        &DisassemblyOptions::default(),
    )
    .map_err(|e| e.to_string())
}

macro_rules! test_case {
    ($name:ident, input: $input:expr, listing: $expected:expr $(,)?) => {
        #[test]
        fn $name() {
            let expected: Result<&str, &str> = $expected;
            pretty_assertions::assert_eq!(
                crate::cases::listing($input),
                expected.map(str::to_string).map_err(str::to_string),
            );
        }
    };
}
