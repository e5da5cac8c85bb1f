//! Hand assemblers for the three payload encodings.
//!
//! Each produces exactly the bit layout its decoder consumes. Only
//! [`lzw_compress`] is a real compressor: it tracks the decoder's dictionary
//! growth so every codeword is written at the width it will be read with.

use std::collections::HashMap;

// ===========================================================================
// MSB-first bit packing
// ===========================================================================

#[derive(Default)]
pub struct MsbBitWriter {
    out: Vec<u8>,
    acc: u8,
    nbits: u32,
}

impl MsbBitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.acc = (self.acc << 1) | bit as u8;
        self.nbits += 1;
        if self.nbits == 8 {
            self.out.push(self.acc);
            self.acc = 0;
            self.nbits = 0;
        }
    }

    pub fn write(&mut self, value: u32, width: u32) {
        for i in (0..width).rev() {
            self.push_bit((value >> i) & 1 != 0);
        }
    }

    /// Fill the last byte with `pad` bits.
    pub fn finish(mut self, pad: bool) -> Vec<u8> {
        while self.nbits != 0 {
            self.push_bit(pad);
        }
        self.out
    }
}

// ===========================================================================
// LZW
// ===========================================================================

/// Decoder-side dictionary size and code width, advanced per data code.
struct WidthSchedule {
    nbit: u32,
    dict_size: usize,
    after_clear: bool,
}

impl WidthSchedule {
    fn new() -> Self {
        Self {
            nbit: 9,
            dict_size: 0x102,
            after_clear: true,
        }
    }

    fn advance(&mut self) {
        if !self.after_clear && self.dict_size < 0x1000 {
            self.dict_size += 1;
            if self.dict_size == 1 << self.nbit && self.nbit < 12 {
                self.nbit += 1;
            }
        }
        self.after_clear = false;
    }
}

/// LZW-encode `data`: a clear code, the data codes, then the end code.
///
/// The dictionary stops growing at 4096 entries; no further clear is sent.
pub fn lzw_compress(data: &[u8], clear: u16, end: u16) -> Vec<u8> {
    let mut writer = MsbBitWriter::new();
    let mut schedule = WidthSchedule::new();
    let mut dict: HashMap<Vec<u8>, u16> = (0..=255u16).map(|b| (vec![b as u8], b)).collect();
    let mut next_code: u16 = 0x102;

    writer.write(clear as u32, schedule.nbit);

    let mut current: Vec<u8> = Vec::new();
    for &b in data {
        let mut candidate = current.clone();
        candidate.push(b);
        if dict.contains_key(&candidate) {
            current = candidate;
            continue;
        }
        writer.write(dict[&current] as u32, schedule.nbit);
        schedule.advance();
        if next_code < 0x1000 {
            dict.insert(candidate, next_code);
            next_code += 1;
        }
        current = vec![b];
    }
    if !current.is_empty() {
        writer.write(dict[&current] as u32, schedule.nbit);
        schedule.advance();
    }

    writer.write(end as u32, schedule.nbit);
    writer.finish(false)
}

/// Pack explicit `(code, width)` pairs, zero padded.
pub fn lzw_codes(codes: &[(u16, u32)]) -> Vec<u8> {
    let mut writer = MsbBitWriter::new();
    for &(code, width) in codes {
        writer.write(code as u32, width);
    }
    writer.finish(false)
}

// ===========================================================================
// Huffman + RLE
// ===========================================================================

pub const LEAF: u16 = 0x8000;

/// Tree that gives the `i`-th symbol the code `1^i 0`.
///
/// The last internal node points back at its own pair, so trailing `1`
/// padding never completes a codeword.
pub struct UnaryHuffman {
    symbols: Vec<u16>,
}

impl UnaryHuffman {
    pub fn new(symbols: &[u16]) -> Self {
        assert!(!symbols.is_empty());
        Self {
            symbols: symbols.to_vec(),
        }
    }

    /// Raw node words, index 0 being the root pair.
    pub fn nodes(&self) -> Vec<u16> {
        let last = self.symbols.len() - 1;
        let mut nodes = Vec::with_capacity(self.symbols.len() * 2);
        for (i, &symbol) in self.symbols.iter().enumerate() {
            nodes.push(LEAF | symbol);
            let child_pair = if i == last { 2 * i } else { 2 * (i + 1) };
            nodes.push((child_pair as u16) << 1);
        }
        nodes
    }

    /// Tree section followed by the codes for `sequence`.
    pub fn encode(&self, sequence: &[u16]) -> Vec<u8> {
        let nodes = self.nodes();
        let mut out = Vec::new();
        out.extend_from_slice(&((nodes.len() * 2) as u16).to_le_bytes());
        for node in &nodes {
            out.extend_from_slice(&node.to_le_bytes());
        }

        let mut writer = MsbBitWriter::new();
        for symbol in sequence {
            let depth = self
                .symbols
                .iter()
                .position(|s| s == symbol)
                .expect("symbol not in tree");
            for _ in 0..depth {
                writer.push_bit(true);
            }
            writer.push_bit(false);
        }
        out.extend_from_slice(&writer.finish(true));
        out
    }
}

pub fn literal(b: u8) -> u16 {
    b as u16
}

/// Run symbol: high byte set, `lo` selects the count encoding.
pub fn run(lo: u8) -> u16 {
    0x100 | lo as u16
}

// ===========================================================================
// DIET
// ===========================================================================

/// LSB-first 16-bit control words interleaved with raw bytes. A new word
/// slot is reserved as soon as the previous one is full, matching the
/// reader's eager refill.
pub struct DietWriter {
    out: Vec<u8>,
    slot: usize,
    bit: u32,
}

impl Default for DietWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DietWriter {
    pub fn new() -> Self {
        Self {
            out: vec![0, 0],
            slot: 0,
            bit: 0,
        }
    }

    pub fn bit(&mut self, set: bool) -> &mut Self {
        if set {
            let byte = self.slot + (self.bit / 8) as usize;
            self.out[byte] |= 1 << (self.bit % 8);
        }
        self.bit += 1;
        if self.bit == 16 {
            self.slot = self.out.len();
            self.out.extend_from_slice(&[0, 0]);
            self.bit = 0;
        }
        self
    }

    pub fn bits(&mut self, pattern: &str) -> &mut Self {
        for c in pattern.chars() {
            self.bit(c == '1');
        }
        self
    }

    pub fn byte(&mut self, b: u8) -> &mut Self {
        self.out.push(b);
        self
    }

    pub fn literal(&mut self, b: u8) -> &mut Self {
        self.bit(true).byte(b)
    }

    /// Two-byte copy from `distance` bytes back, short form.
    pub fn short_copy(&mut self, distance: u16) -> &mut Self {
        assert!((2..=256).contains(&distance));
        let offset = (distance as i16).wrapping_neg() as u16;
        self.bits("00").byte(offset as u8).bit(false)
    }

    /// Long-form copy of `2 + extra` bytes from `distance` back, with the
    /// offset high byte left at `0xFF`.
    pub fn long_copy(&mut self, distance: u16, extra: usize) -> &mut Self {
        assert!((1..=256).contains(&distance));
        assert!((1..=4).contains(&extra));
        let offset = (distance as i16).wrapping_neg() as u16;
        self.bits("01").byte(offset as u8).bits("11");
        for _ in 1..extra {
            self.bit(false);
        }
        self.bit(true)
    }

    pub fn end(&mut self) -> &mut Self {
        self.bits("00").byte(0xFF).bit(false)
    }

    pub fn finish(&self) -> Vec<u8> {
        self.out.clone()
    }
}
