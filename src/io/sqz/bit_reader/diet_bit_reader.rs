//! Least-significant-bit-first reader over 16-bit little-endian words, as
//! used by the DIET payload.
//!
//! Control bits and raw bytes share the same stream: a control word is
//! fetched as soon as the previous one is used up, and literal bytes are
//! taken from wherever the stream is at that moment.

use std::io::Read;

use byteorder::ReadBytesExt;

use crate::error::{Result, SqzError};

use super::read_optional_byte;

pub struct DietBitReader<'a, R: ?Sized> {
    stream: &'a mut R,
    word: Option<u16>,
    bit: u32,
}

impl<'a, R: Read + ?Sized> DietBitReader<'a, R> {
    /// Prime the reader with the first control word.
    pub fn new(stream: &'a mut R) -> Result<Self> {
        let word = read_optional_word(stream)?;
        Ok(Self {
            stream,
            word,
            bit: 0,
        })
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        let word = self
            .word
            .ok_or_else(|| SqzError::Truncated("DIET control word past end of stream".into()))?;
        let value = (word >> self.bit) & 1 != 0;
        self.bit += 1;
        if self.bit == 16 {
            // A missing word only matters if another bit is requested.
            self.word = read_optional_word(self.stream)?;
            self.bit = 0;
        }
        Ok(value)
    }

    /// Three bits composed most significant first.
    pub fn read_3bit_value(&mut self) -> Result<u8> {
        let mut value = 0u8;
        for _ in 0..3 {
            value = (value << 1) | self.read_bit()? as u8;
        }
        Ok(value)
    }

    /// One raw byte straight from the stream, bypassing the bit buffer.
    pub fn read_next_byte(&mut self) -> Result<u8> {
        self.stream
            .read_u8()
            .map_err(|e| SqzError::from_read(e, "DIET literal byte"))
    }
}

fn read_optional_word<R: Read + ?Sized>(stream: &mut R) -> Result<Option<u16>> {
    let Some(lo) = read_optional_byte(stream)? else {
        return Ok(None);
    };
    let Some(hi) = read_optional_byte(stream)? else {
        return Ok(None);
    };
    Ok(Some(u16::from_le_bytes([lo, hi])))
}
