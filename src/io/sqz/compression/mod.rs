//! Payload decompressors for SQZ containers.
//!
//! Three codecs are in use:
//! - **LZW** (TTF type `0x10`): adaptive dictionary, 9 to 12 bit codewords
//! - **Huffman + RLE** (other TTF types): serialized tree, run-length escapes
//! - **DIET**: LZ-style back-references with an exact output size

pub mod diet;
pub mod huffman_rle;
pub mod lzw;

use std::io::{Cursor, Read};

use crate::error::Result;

pub use diet::DietDecompressor;
pub use huffman_rle::HuffmanRleDecompressor;
pub use lzw::{LzwDecompressor, LzwVariant};

/// Trait for decompressing a container payload.
pub trait Decompressor {
    /// Decompress from `source`, which is positioned right after the header.
    ///
    /// `payload_size` is the size declared by the header. It is exact for
    /// DIET and only a capacity hint for the other codecs.
    fn decompress_from(&self, source: &mut dyn Read, payload_size: usize) -> Result<Vec<u8>>;

    /// Decompress an in-memory payload.
    fn decompress(&self, source: &[u8], payload_size: usize) -> Result<Vec<u8>> {
        let mut src = Cursor::new(source);
        self.decompress_from(&mut src, payload_size)
    }
}
