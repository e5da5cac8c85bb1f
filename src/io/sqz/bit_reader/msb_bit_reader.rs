//! Most-significant-bit-first single bit reader for the Huffman payload.

use std::io::Read;

use crate::error::{Result, SqzError};

use super::read_optional_byte;

/// Delivers one bit per call, MSB first, refilling a byte at a time.
///
/// One byte of lookahead is kept so that [`is_eof`](Self::is_eof) can answer
/// without consuming input.
pub struct MsbBitReader<'a, R: ?Sized> {
    stream: &'a mut R,
    current: u8,
    bit: u8,
    next: Option<u8>,
}

impl<'a, R: Read + ?Sized> MsbBitReader<'a, R> {
    pub fn new(stream: &'a mut R) -> Result<Self> {
        let next = read_optional_byte(stream)?;
        Ok(Self {
            stream,
            current: 0,
            bit: 8,
            next,
        })
    }

    /// `true` once the current byte is used up and the stream has nothing left.
    pub fn is_eof(&self) -> bool {
        self.bit == 8 && self.next.is_none()
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit == 8 {
            self.current = self
                .next
                .take()
                .ok_or_else(|| SqzError::Truncated("bit read past end of stream".into()))?;
            self.next = read_optional_byte(self.stream)?;
            self.bit = 0;
        }
        let value = (self.current >> (7 - self.bit)) & 1 != 0;
        self.bit += 1;
        Ok(value)
    }
}
