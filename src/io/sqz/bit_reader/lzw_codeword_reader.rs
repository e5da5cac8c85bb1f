//! 24-bit sliding window codeword reader for the LZW payload.

use std::io::Read;

use crate::error::{Result, SqzError};
use crate::io::sqz::constants::lzw::{MAX_CODE_WIDTH, MIN_CODE_WIDTH};

use super::read_optional_byte;

const WINDOW_BITS: u32 = 24;
const WINDOW_MASK: u32 = 0x00FF_FFFF;

/// Reads MSB-aligned codewords from a 24-bit window that is topped up one
/// byte at a time.
///
/// Only the leading `valid_bits` of the window came from the stream. Once the
/// stream is exhausted no more refills happen, and a codeword that would reach
/// into the zero padding is reported as truncated.
pub struct LzwCodeWordReader<'a, R: ?Sized> {
    stream: &'a mut R,
    window: u32,
    missing_bits: u32,
    valid_bits: u32,
    exhausted: bool,
}

impl<'a, R: Read + ?Sized> LzwCodeWordReader<'a, R> {
    /// Prime the window with up to three bytes.
    pub fn new(stream: &'a mut R) -> Result<Self> {
        let mut reader = Self {
            stream,
            window: 0,
            missing_bits: 0,
            valid_bits: 0,
            exhausted: false,
        };
        for shift in [16, 8, 0] {
            match read_optional_byte(reader.stream)? {
                Some(b) => {
                    reader.window |= (b as u32) << shift;
                    reader.valid_bits += 8;
                }
                None => {
                    reader.exhausted = true;
                    break;
                }
            }
        }
        Ok(reader)
    }

    /// Take the top `nbit` bits of the window as a codeword.
    pub fn read_codeword(&mut self, nbit: u32) -> Result<u16> {
        debug_assert!((MIN_CODE_WIDTH..=MAX_CODE_WIDTH).contains(&nbit));

        if self.valid_bits < nbit {
            return Err(SqzError::Truncated(format!(
                "LZW stream ended inside a {nbit}-bit codeword before the end code"
            )));
        }

        let cw = self.window >> (WINDOW_BITS - nbit);
        self.window = (self.window << nbit) & WINDOW_MASK;
        self.valid_bits -= nbit;
        self.missing_bits += nbit;

        while self.missing_bits >= 8 && !self.exhausted {
            match read_optional_byte(self.stream)? {
                Some(b) => {
                    self.missing_bits -= 8;
                    self.window |= (b as u32) << self.missing_bits;
                    self.valid_bits += 8;
                }
                None => self.exhausted = true,
            }
        }

        Ok(cw as u16)
    }
}
