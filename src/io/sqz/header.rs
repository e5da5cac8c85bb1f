//! Container header detection and parsing.
//!
//! A container is DIET when its first two bytes read as the little-endian
//! value `0x4CB4`; anything else is a TTF container whose type byte picks
//! LZW (`0x10`) or Huffman+RLE.
//!
//! | Format | Offset | Field                                   |
//! |--------|--------|-----------------------------------------|
//! | DIET   | 0–8    | signature/version (unvalidated)         |
//! | DIET   | 9      | reserved                                |
//! | DIET   | 10–13  | checksum (unvalidated)                  |
//! | DIET   | 14     | bits 2–6: payload size bits 16–20       |
//! | DIET   | 15–16  | payload size bits 0–15, little-endian   |
//! | TTF    | 0      | low nibble: payload size bits 16–19     |
//! | TTF    | 1      | type                                    |
//! | TTF    | 2–3    | payload size bits 0–15, little-endian   |

use std::fmt;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Result, SqzError};

use super::constants::{diet, ttf};

/// Payload codec selected by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqzFormat {
    Lzw,
    HuffmanRle,
    Diet,
}

impl fmt::Display for SqzFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lzw => write!(f, "LZW"),
            Self::HuffmanRle => write!(f, "Huffman+RLE"),
            Self::Diet => write!(f, "DIET"),
        }
    }
}

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqzHeader {
    pub format: SqzFormat,
    /// Declared decompressed size: exact for DIET, advisory otherwise.
    pub payload_size: usize,
    /// TTF type byte; `None` for DIET.
    pub type_byte: Option<u8>,
}

impl SqzHeader {
    /// Read the header, leaving `reader` at the start of the payload.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut marker = [0u8; 2];
        reader
            .read_exact(&mut marker)
            .map_err(|e| SqzError::from_read(e, "container signature"))?;

        if u16::from_le_bytes(marker) == diet::SIGNATURE {
            Self::read_diet(reader)
        } else {
            Self::read_ttf(marker, reader)
        }
    }

    /// Parse the header at the start of an in-memory container.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(&mut Cursor::new(data))
    }

    /// Number of header bytes before the payload.
    pub fn header_len(&self) -> usize {
        match self.format {
            SqzFormat::Diet => diet::HEADER_LEN,
            SqzFormat::Lzw | SqzFormat::HuffmanRle => ttf::HEADER_LEN,
        }
    }

    fn read_diet<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        // Rest of the signature block, the reserved byte and the checksum.
        let mut skipped = [0u8; diet::SIZE_HIGH_OFFSET - 2];
        reader
            .read_exact(&mut skipped)
            .map_err(|e| SqzError::from_read(e, "DIET header"))?;

        let size_high = reader
            .read_u8()
            .map_err(|e| SqzError::from_read(e, "DIET payload size"))?;
        let size_low = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| SqzError::from_read(e, "DIET payload size"))?;

        let high = ((size_high >> diet::SIZE_HIGH_SHIFT) & diet::SIZE_HIGH_MASK) as usize;
        Ok(Self {
            format: SqzFormat::Diet,
            payload_size: (high << 16) | size_low as usize,
            type_byte: None,
        })
    }

    fn read_ttf<R: Read + ?Sized>(marker: [u8; 2], reader: &mut R) -> Result<Self> {
        let [size_high, type_byte] = marker;
        let size_low = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| SqzError::from_read(e, "TTF payload size"))?;

        let high = (size_high & ttf::SIZE_HIGH_MASK) as usize;
        let format = if type_byte == ttf::TYPE_LZW {
            SqzFormat::Lzw
        } else {
            SqzFormat::HuffmanRle
        };
        Ok(Self {
            format,
            payload_size: (high << 16) | size_low as usize,
            type_byte: Some(type_byte),
        })
    }
}
