//! SQZ container support.
//!
//! # Module Structure
//!
//! - [`constants`]: Signatures, header layouts, codec limits
//! - [`header`]: Format detection and payload size parsing
//! - [`bit_reader`]: The three bit/codeword cursors
//! - [`compression`]: LZW, Huffman+RLE and DIET decompressors
//! - [`reader`]: [`SqzReader`], the dispatcher from header to decoder
//! - [`library`]: Named resources in a data directory

pub mod bit_reader;
pub mod compression;
pub mod constants;
pub mod header;
pub mod library;
pub mod reader;

// Re-export commonly used types
pub use compression::{
    Decompressor, DietDecompressor, HuffmanRleDecompressor, LzwDecompressor, LzwVariant,
};
pub use header::{SqzFormat, SqzHeader};
pub use library::SqzLibrary;
pub use reader::{unpack, unpack_bytes, SqzReader, SqzReaderConfiguration};
