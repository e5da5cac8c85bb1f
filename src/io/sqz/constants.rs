//! Signatures, header layouts, and codec constants for SQZ containers.

/// DIET container header (17 bytes).
pub mod diet {
    /// Little-endian value of the first two bytes of a DIET container.
    pub const SIGNATURE: u16 = 0x4CB4;
    /// Signature/version block, including the two marker bytes.
    pub const SIGNATURE_LEN: usize = 9;
    /// Reserved byte after the signature block.
    pub const RESERVED_LEN: usize = 1;
    /// Checksum bytes (not validated).
    pub const CHECKSUM_LEN: usize = 4;
    /// Offset of the size-high byte.
    pub const SIZE_HIGH_OFFSET: usize = SIGNATURE_LEN + RESERVED_LEN + CHECKSUM_LEN;
    /// Total header length; the bitstream starts here.
    pub const HEADER_LEN: usize = SIZE_HIGH_OFFSET + 3;
    /// Bits 2..=6 of the size-high byte hold the top 5 bits of the payload size.
    pub const SIZE_HIGH_SHIFT: u32 = 2;
    pub const SIZE_HIGH_MASK: u8 = 0x1F;
    /// Short-form offset low byte that, with a `0xFF` high byte, ends the stream.
    pub const END_MARKER: u8 = 0xFF;
}

/// TTF container header (4 bytes).
pub mod ttf {
    pub const HEADER_LEN: usize = 4;
    /// Low nibble of byte 0 holds the top 4 bits of the payload size.
    pub const SIZE_HIGH_MASK: u8 = 0x0F;
    /// Type byte selecting the LZW payload; any other value is Huffman+RLE.
    pub const TYPE_LZW: u8 = 0x10;
}

/// LZW dictionary and codeword parameters.
pub mod lzw {
    pub const CODE_CLEAR: u16 = 0x100;
    pub const CODE_END: u16 = 0x101;
    /// 256 singletons plus the two sentinel codes.
    pub const DICT_INITIAL_SIZE: usize = 0x102;
    pub const DICT_LIMIT: usize = 0x1000;
    pub const MIN_CODE_WIDTH: u32 = 9;
    pub const MAX_CODE_WIDTH: u32 = 12;
}

/// Huffman tree node encoding and RLE escapes.
pub mod huffman {
    /// Set on leaf nodes; clear on internal nodes.
    pub const LEAF_FLAG: u16 = 0x8000;
    pub const SYMBOL_MASK: u16 = 0x7FFF;
    /// Run symbol low byte: count is the low byte of the next symbol.
    pub const RUN_COUNT_BYTE: u8 = 0;
    /// Run symbol low byte: count is the big-endian pair of the next two symbols.
    pub const RUN_COUNT_WORD: u8 = 1;
    /// Most bits an encoder pads the final byte with.
    pub const MAX_PAD_BITS: u32 = 7;
}

/// File naming used by the game data directory.
pub mod resources {
    pub const DEFAULT_DIRECTORY: &str = "sqz";
    pub const ASSET_EXTENSION: &str = "SQZ";
    pub const TRACK_EXTENSION: &str = "TRK";
    pub const RAW_EXTENSION: &str = "BIN";
}
