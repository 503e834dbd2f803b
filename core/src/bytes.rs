//! Byte source and byte sink used by the instruction codec.
//!
//! All multi-byte values are big-endian, as in the class-file format.

use core::convert::Infallible;

use crate::error::DecodeError;

/// Sequential reader over a code array.
///
/// Keeps track of its position so decode errors can report the offset
/// where the source ran out.
#[derive(Debug, Clone)]
pub struct ByteSequence<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteSequence<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.position + N;
        let chunk = self
            .bytes
            .get(self.position..end)
            .ok_or(DecodeError::UnexpectedEnd {
                offset: self.position,
                needed: N,
                available: self.remaining(),
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.position = end;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.take::<1>().map(|[b]| b)
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        self.take::<1>().map(|[b]| b as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.take::<2>().map(u16::from_be_bytes)
    }
}

/// Destination for encoded instructions.
///
/// Encoding never fails on its own; whatever error the sink reports is
/// handed back to the caller untouched.
pub trait ByteSink {
    type Error;

    fn write_u8(&mut self, byte: u8) -> Result<(), Self::Error>;

    fn write_i8(&mut self, byte: i8) -> Result<(), Self::Error> {
        self.write_u8(byte as u8)
    }

    fn write_u16(&mut self, value: u16) -> Result<(), Self::Error> {
        let [hi, lo] = value.to_be_bytes();
        self.write_u8(hi)?;
        self.write_u8(lo)
    }
}

impl ByteSink for crate::Vec<u8> {
    type Error = Infallible;

    fn write_u8(&mut self, byte: u8) -> Result<(), Infallible> {
        self.push(byte);
        Ok(())
    }

    fn write_u16(&mut self, value: u16) -> Result<(), Infallible> {
        self.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    type Error = S::Error;

    fn write_u8(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_u8(byte)
    }

    fn write_u16(&mut self, value: u16) -> Result<(), Self::Error> {
        (**self).write_u16(value)
    }
}

/// Adapts any [`std::io::Write`] into a [`ByteSink`].
#[cfg(any(feature = "std", test))]
#[derive(Debug)]
pub struct IoSink<W>(pub W);

#[cfg(any(feature = "std", test))]
impl<W: std::io::Write> ByteSink for IoSink<W> {
    type Error = std::io::Error;

    fn write_u8(&mut self, byte: u8) -> std::io::Result<()> {
        self.0.write_all(&[byte])
    }

    fn write_u16(&mut self, value: u16) -> std::io::Result<()> {
        self.0.write_all(&value.to_be_bytes())
    }
}
