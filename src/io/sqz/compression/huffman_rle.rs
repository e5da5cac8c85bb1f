//! Huffman + run-length decompression for TTF containers.
//!
//! The payload starts with a serialized tree: a little-endian byte count
//! followed by `count / 2` little-endian node words. Node pairs are
//! addressed by the index of their first node; the root pair is at 0.
//!
//! Decoded symbols are 15 bits wide. A zero high byte makes the low byte a
//! literal; any other high byte repeats the last literal, with the count
//! taken from the low byte or from the following symbols.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Result, SqzError};
use crate::io::sqz::bit_reader::MsbBitReader;
use crate::io::sqz::constants::huffman::{
    LEAF_FLAG, MAX_PAD_BITS, RUN_COUNT_BYTE, RUN_COUNT_WORD, SYMBOL_MASK,
};

/// Decompressor for the Huffman + RLE payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanRleDecompressor;

impl super::Decompressor for HuffmanRleDecompressor {
    fn decompress_from(&self, source: &mut dyn Read, payload_size: usize) -> Result<Vec<u8>> {
        decompress_huffman_rle(source, payload_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    /// Index of the first node of the child pair.
    Internal(u16),
    /// 15-bit symbol.
    Leaf(u16),
}

impl HuffmanNode {
    pub fn from_raw(raw: u16) -> Self {
        if raw & LEAF_FLAG == 0 {
            HuffmanNode::Internal(raw >> 1)
        } else {
            HuffmanNode::Leaf(raw & SYMBOL_MASK)
        }
    }
}

/// Flat, immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
}

impl HuffmanTree {
    pub fn from_nodes(nodes: Vec<HuffmanNode>) -> Self {
        Self { nodes }
    }

    /// Parse the serialized tree section.
    pub fn read<R: Read + ?Sized>(stream: &mut R) -> Result<Self> {
        let size_bytes = stream
            .read_u16::<LittleEndian>()
            .map_err(|e| SqzError::from_read(e, "Huffman tree size"))?;
        let count = (size_bytes >> 1) as usize;

        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            let raw = stream
                .read_u16::<LittleEndian>()
                .map_err(|e| SqzError::from_read(e, "Huffman tree node"))?;
            nodes.push(HuffmanNode::from_raw(raw));
        }
        Ok(Self { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk from the root until a leaf, or until the bits run out.
    pub fn read_symbol<R: Read + ?Sized>(&self, bits: &mut MsbBitReader<'_, R>) -> Result<HuffmanCode> {
        let mut index = 0usize;
        let mut walked = 0u32;
        while !bits.is_eof() {
            let slot = index + bits.read_bit()? as usize;
            walked += 1;
            let node = self.nodes.get(slot).ok_or_else(|| {
                SqzError::InvalidHuffmanTree(format!(
                    "node {slot} referenced but tree has {} nodes",
                    self.nodes.len()
                ))
            })?;
            match *node {
                HuffmanNode::Internal(next) => index = next as usize,
                HuffmanNode::Leaf(symbol) => return Ok(HuffmanCode::Symbol(symbol)),
            }
        }
        Ok(HuffmanCode::End { tail_bits: walked })
    }

    fn read_count_byte<R: Read + ?Sized>(&self, bits: &mut MsbBitReader<'_, R>) -> Result<u8> {
        match self.read_symbol(bits)? {
            HuffmanCode::Symbol(symbol) => Ok(symbol as u8),
            HuffmanCode::End { .. } => Err(SqzError::Truncated("run length symbol missing".into())),
        }
    }
}

/// Result of one tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanCode {
    Symbol(u16),
    /// No bits left. `tail_bits` were consumed by a codeword that never
    /// reached a leaf (0 when the stream ended on a codeword boundary).
    End { tail_bits: u32 },
}

/// Decoded Huffman payload plus what was left over at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanOutput {
    pub data: Vec<u8>,
    /// Bits of the unfinished final codeword.
    pub tail_bits: u32,
}

impl HuffmanOutput {
    /// `true` when the unfinished codeword is longer than byte padding can be.
    pub fn has_partial_codeword(&self) -> bool {
        self.tail_bits > MAX_PAD_BITS
    }
}

/// Decompress a Huffman + RLE payload until the bit source is exhausted.
pub fn decompress_huffman_rle<R: Read + ?Sized>(src: &mut R, payload_size: usize) -> Result<Vec<u8>> {
    decompress_huffman_rle_with_tail(src, payload_size).map(|decoded| decoded.data)
}

/// Like [`decompress_huffman_rle`], also reporting the unfinished tail.
pub fn decompress_huffman_rle_with_tail<R: Read + ?Sized>(
    src: &mut R,
    payload_size: usize,
) -> Result<HuffmanOutput> {
    let mut output = Vec::with_capacity(payload_size);
    if payload_size == 0 {
        return Ok(HuffmanOutput {
            data: output,
            tail_bits: 0,
        });
    }

    let tree = HuffmanTree::read(src)?;
    let mut bits = MsbBitReader::new(src)?;
    let mut last = 0u8;

    let tail_bits = loop {
        let symbol = match tree.read_symbol(&mut bits)? {
            HuffmanCode::Symbol(symbol) => symbol,
            HuffmanCode::End { tail_bits } => break tail_bits,
        };
        let [hi, lo] = symbol.to_be_bytes();
        if hi == 0 {
            last = lo;
            output.push(lo);
            continue;
        }

        let count = match lo {
            RUN_COUNT_BYTE => tree.read_count_byte(&mut bits)? as usize,
            RUN_COUNT_WORD => {
                let count_hi = tree.read_count_byte(&mut bits)?;
                let count_lo = tree.read_count_byte(&mut bits)?;
                u16::from_be_bytes([count_hi, count_lo]) as usize
            }
            n => n as usize,
        };
        output.resize(output.len() + count, last);
    };

    tracing::trace!(tail_bits, "Huffman stream exhausted");
    Ok(HuffmanOutput {
        data: output,
        tail_bits,
    })
}
