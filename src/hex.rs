//! Hex text in, bytes out.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexError {
    /// `position` is a char offset into the input text.
    #[error("invalid hex digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("odd number of hex digits ({digits})")]
    OddLength { digits: usize },
}

impl HexError {
    pub fn position(&self) -> Option<usize> {
        match self {
            HexError::InvalidDigit { position, .. } => Some(*position),
            HexError::OddLength { .. } => None,
        }
    }
}

/// Parse hex digits into bytes. Whitespace, commas and `0x` prefixes are
/// ignored, so `"10 05 44"`, `"100544"` and `"0x10, 0x05, 0x44"` all parse
/// to the same three bytes.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let mut digits = Vec::with_capacity(text.len());
    let mut chars = text.chars().enumerate().peekable();

    while let Some((position, ch)) = chars.next() {
        if ch.is_whitespace() || ch == ',' {
            continue;
        }
        if ch == '0' && matches!(chars.peek(), Some((_, 'x' | 'X'))) {
            chars.next();
            continue;
        }
        match ch.to_digit(16) {
            Some(d) => digits.push(d as u8),
            None => return Err(HexError::InvalidDigit { ch, position }),
        }
    }

    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength {
            digits: digits.len(),
        });
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Render `bytes` as the dump the error renderer labels: two digits per
/// byte, sixteen bytes per line. Byte `i` always starts at char `3 * i`.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        out.push_str(&format!("{:02X}", byte));
        out.push(if i % 16 == 15 { '\n' } else { ' ' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepted_spellings() {
        let expected = vec![0x10, 0x05, 0x44];
        assert_eq!(parse_hex("10 05 44"), Ok(expected.clone()));
        assert_eq!(parse_hex("100544"), Ok(expected.clone()));
        assert_eq!(parse_hex("0x10, 0x05, 0x44"), Ok(expected.clone()));
        assert_eq!(parse_hex("10\n05\t44\n"), Ok(expected));
        assert_eq!(parse_hex("c4 38 01 2c"), Ok(vec![0xC4, 0x38, 0x01, 0x2C]));
        assert_eq!(parse_hex(""), Ok(vec![]));
    }

    #[test]
    fn test_zero_byte_is_not_a_prefix() {
        assert_eq!(parse_hex("00 03"), Ok(vec![0x00, 0x03]));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_hex("10 0g"),
            Err(HexError::InvalidDigit {
                ch: 'g',
                position: 4
            })
        );
        assert_eq!(parse_hex("10 5"), Err(HexError::OddLength { digits: 3 }));
    }

    #[test]
    fn test_dump_layout() {
        assert_eq!(hex_dump(&[0x10, 0xF9, 0x44]), "10 F9 44 ");
        let dump = hex_dump(&[0; 17]);
        assert_eq!(dump.lines().count(), 2);
        assert_eq!(&dump[45..48], "00\n");
        assert_eq!(&dump[48..50], "00");
    }
}
