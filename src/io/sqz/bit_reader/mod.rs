//! Bit and codeword cursors over a byte stream.
//!
//! Each container payload packs its bits differently, so every decoder owns
//! its own cursor type:
//!
//! - [`LzwCodeWordReader`]: 24-bit MSB-aligned window, 9 to 12 bit codewords
//! - [`MsbBitReader`]: single bits, most significant first, byte refills
//! - [`DietBitReader`]: single bits, least significant first, 16-bit LE word
//!   refills, plus raw bytes read around the bit buffer

pub mod diet_bit_reader;
pub mod lzw_codeword_reader;
pub mod msb_bit_reader;

pub use diet_bit_reader::DietBitReader;
pub use lzw_codeword_reader::LzwCodeWordReader;
pub use msb_bit_reader::MsbBitReader;

use std::io::{self, Read};

use crate::error::Result;

/// Read one byte, or `None` at a clean end of stream.
pub(crate) fn read_optional_byte<R: Read + ?Sized>(stream: &mut R) -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
