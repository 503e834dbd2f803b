//! Error rendering using ariadne
//!
//! Decode errors are drawn against a hex dump of the code array (see
//! [`hex_dump`]), with a label under the offending byte. Hex errors are
//! drawn against the input text.

use crate::{DecodeError, Error, HexError, hex_dump};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;
use std::ops::Range;

const CODE_ID: &str = "<code>";
const INPUT_ID: &str = "<input>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use jinsn::{DecodeOptions, decode, render_error};
///
/// if let Err(e) = decode(&[0x10, 0x05, 0x61], &DecodeOptions::default()) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for tests, logs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Hex { error, input } => render_hex_error(error, input, writer, use_color),
        Error::Decode { error, code } => render_decode_error(error, code, writer, use_color),
    }
}

fn render_hex_error(
    error: &HexError,
    input: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let Some(position) = error.position() else {
        return writeln!(writer, "Error: invalid hex input: {}", error);
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let span = position..position + 1;
    Report::build(ReportKind::Error, (INPUT_ID, span.clone()))
        .with_message(format!("invalid hex input: {}", error))
        .with_config(ariadne::Config::default().with_color(use_color))
        .with_label(
            Label::new((INPUT_ID, span))
                .with_message("not a hex digit")
                .with_color(colors.next()),
        )
        .finish()
        .write((INPUT_ID, Source::from(input)), &mut *writer)
}

fn render_decode_error(
    error: &DecodeError,
    code: &[u8],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let (label, help) = match error {
        DecodeError::UnexpectedEnd { needed, .. } => {
            (format!("needs {} more byte(s) after this", needed), None)
        }
        DecodeError::UnknownOpcode { .. } => ("not an instruction".to_string(), None),
        DecodeError::IllegalWide { .. } => (
            "no wide form".to_string(),
            Some("`wide` may only precede fstore"),
        ),
        DecodeError::CodeTooLong { .. } => return writeln!(writer, "Error: {}", error),
    };
    let (Some(offset), false) = (error.offset(), code.is_empty()) else {
        return writeln!(writer, "Error: {}", error);
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let span = byte_span(offset, code.len());
    let mut report = Report::build(ReportKind::Error, (CODE_ID, span.clone()))
        .with_message(error.to_string())
        .with_config(ariadne::Config::default().with_color(use_color))
        .with_label(
            Label::new((CODE_ID, span))
                .with_message(label)
                .with_color(colors.next()),
        );
    if let Some(help) = help {
        report = report.with_help(help);
    }

    let dump = hex_dump(code);
    report
        .finish()
        .write((CODE_ID, Source::from(dump.as_str())), &mut *writer)
}

/// Chars covering byte `offset` in the dump. Offsets past the end label the
/// last byte.
fn byte_span(offset: usize, len: usize) -> Range<usize> {
    let at = offset.min(len.saturating_sub(1));
    at * 3..at * 3 + 2
}
