//! LZW decompression for TTF containers of type `0x10`.
//!
//! The dictionary is a dense table indexed by code. Singletons hold their
//! byte; learned entries point at the place in the output where their string
//! was produced, so no string is ever stored twice.

use std::io::Read;

use crate::error::{Result, SqzError};
use crate::io::sqz::bit_reader::LzwCodeWordReader;
use crate::io::sqz::constants::lzw::{
    CODE_CLEAR, CODE_END, DICT_INITIAL_SIZE, DICT_LIMIT, MAX_CODE_WIDTH, MIN_CODE_WIDTH,
};

/// Assignment of the clear and end sentinel codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LzwVariant {
    /// clear = `0x100`, end = `0x101`
    #[default]
    Standard,
    /// clear = `0x101`, end = `0x100`
    Alternate,
}

impl LzwVariant {
    pub fn clear_code(self) -> u16 {
        match self {
            LzwVariant::Standard => CODE_CLEAR,
            LzwVariant::Alternate => CODE_END,
        }
    }

    pub fn end_code(self) -> u16 {
        match self {
            LzwVariant::Standard => CODE_END,
            LzwVariant::Alternate => CODE_CLEAR,
        }
    }
}

/// Decompressor for the LZW payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzwDecompressor {
    pub variant: LzwVariant,
}

impl LzwDecompressor {
    pub fn new(variant: LzwVariant) -> Self {
        Self { variant }
    }
}

impl super::Decompressor for LzwDecompressor {
    fn decompress_from(&self, source: &mut dyn Read, payload_size: usize) -> Result<Vec<u8>> {
        decompress_lzw(source, payload_size, self.variant)
    }
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Byte(u8),
    /// Sentinel slot, never resolved to a string.
    Reserved,
    /// `len` bytes of output starting at `start`.
    Span { start: usize, len: usize },
}

struct Dictionary {
    entries: Vec<Entry>,
}

impl Dictionary {
    fn new() -> Self {
        let mut entries = Vec::with_capacity(DICT_LIMIT);
        entries.extend((0..=255u8).map(Entry::Byte));
        entries.resize(DICT_INITIAL_SIZE, Entry::Reserved);
        Self { entries }
    }

    fn reset(&mut self) {
        self.entries.truncate(DICT_INITIAL_SIZE);
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn is_full(&self) -> bool {
        self.entries.len() >= DICT_LIMIT
    }
}

/// Where the previous codeword's string sits in the output.
#[derive(Debug, Clone, Copy)]
struct Emitted {
    start: usize,
    len: usize,
}

/// Decompress an LZW codeword stream until its end code.
pub fn decompress_lzw<R: Read + ?Sized>(
    src: &mut R,
    payload_size: usize,
    variant: LzwVariant,
) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(payload_size);
    if payload_size == 0 {
        return Ok(output);
    }

    let code_clear = variant.clear_code();
    let code_end = variant.end_code();

    let mut reader = LzwCodeWordReader::new(src)?;
    let mut dict = Dictionary::new();
    let mut nbit = MIN_CODE_WIDTH;
    // `None` at the start and right after a clear code.
    let mut prev: Option<Emitted> = None;

    loop {
        let cw = reader.read_codeword(nbit)?;
        if cw == code_end {
            break;
        }
        if cw == code_clear {
            tracing::trace!(at = output.len(), "LZW dictionary reset");
            dict.reset();
            nbit = MIN_CODE_WIDTH;
            prev = None;
            continue;
        }

        let start = output.len();
        let code = cw as usize;
        if code < dict.size() {
            match dict.entries[code] {
                Entry::Byte(b) => output.push(b),
                Entry::Span { start: s, len } => output.extend_from_within(s..s + len),
                Entry::Reserved => {
                    return Err(SqzError::MalformedDictionaryReference {
                        code: cw,
                        dict_size: dict.size(),
                    })
                }
            }
        } else {
            match prev {
                // The code being defined right now: previous string plus its first byte.
                Some(p) if code == dict.size() && !dict.is_full() => {
                    output.extend_from_within(p.start..p.start + p.len);
                    output.push(output[p.start]);
                }
                _ => {
                    return Err(SqzError::MalformedDictionaryReference {
                        code: cw,
                        dict_size: dict.size(),
                    })
                }
            }
        }

        if let Some(p) = prev {
            if !dict.is_full() {
                // Previous string followed by the first byte of this one, which
                // is exactly the output right after the previous string.
                dict.entries.push(Entry::Span {
                    start: p.start,
                    len: p.len + 1,
                });
                if dict.size() == 1 << nbit && nbit < MAX_CODE_WIDTH {
                    nbit += 1;
                }
            }
        }

        prev = Some(Emitted {
            start,
            len: output.len() - start,
        });
    }

    Ok(output)
}
