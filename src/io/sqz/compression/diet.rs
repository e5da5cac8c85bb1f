//! DIET decompression.
//!
//! The output size is known from the header, so the buffer is allocated up
//! front and filled left to right. Control bits come from [`DietBitReader`];
//! literal bytes and offset low bytes are read raw from the same stream.
//!
//! A back-reference copies byte by byte so that an offset shorter than the
//! repeat count extends its own output (offset -1 repeats the last byte).

use std::io::Read;

use crate::error::{Result, SqzError};
use crate::io::sqz::bit_reader::DietBitReader;
use crate::io::sqz::constants::diet::END_MARKER;

/// Decompressor for the DIET payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct DietDecompressor;

impl super::Decompressor for DietDecompressor {
    fn decompress_from(&self, source: &mut dyn Read, payload_size: usize) -> Result<Vec<u8>> {
        decompress_diet(source, payload_size)
    }
}

/// Decompress a DIET bitstream into exactly `payload_size` bytes.
///
/// If the end marker shows up early the rest of the buffer stays zeroed.
pub fn decompress_diet<R: Read + ?Sized>(src: &mut R, payload_size: usize) -> Result<Vec<u8>> {
    decompress_diet_with_end(src, payload_size).map(|decoded| decoded.data)
}

/// How a DIET stream finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietEnd {
    /// The end marker was read, early or right after the last byte.
    Marker,
    /// The stream stopped after the last byte without an end marker.
    EndOfStream,
    /// Something other than an end marker follows the last byte.
    Unterminated,
}

/// Decoded DIET payload and how the stream around it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DietOutput {
    /// Always `payload_size` bytes.
    pub data: Vec<u8>,
    /// Bytes actually decoded before the stream ended.
    pub produced: usize,
    pub end: DietEnd,
}

/// Like [`decompress_diet`], also reporting how many bytes were produced and
/// whether the end marker was found.
///
/// Once the output is full the end marker that normally follows is consumed,
/// so whatever remains in `src` afterwards lies outside the stream.
pub fn decompress_diet_with_end<R: Read + ?Sized>(
    src: &mut R,
    payload_size: usize,
) -> Result<DietOutput> {
    let mut output = vec![0u8; payload_size];
    if payload_size == 0 {
        return Ok(DietOutput {
            data: output,
            produced: 0,
            end: DietEnd::EndOfStream,
        });
    }

    let mut bits = DietBitReader::new(src)?;
    let mut idx = 0usize;

    'decode: while idx < payload_size {
        while bits.read_bit()? {
            output[idx] = bits.read_next_byte()?;
            idx += 1;
            if idx >= payload_size {
                break 'decode;
            }
        }

        let long_form = bits.read_bit()?;
        let offset_lo = bits.read_next_byte()?;

        let (offset_hi, repeat_count) = if long_form {
            let hi = read_offset_high(&mut bits)?;
            (hi, 2 + read_repeat_count(&mut bits)?)
        } else if bits.read_bit()? {
            ((0xF8 | bits.read_3bit_value()?) - 1, 2)
        } else {
            if offset_lo == END_MARKER {
                tracing::debug!(at = idx, payload_size, "DIET end marker");
                return Ok(DietOutput {
                    data: output,
                    produced: idx,
                    end: DietEnd::Marker,
                });
            }
            (0xFF, 2)
        };

        let offset = i16::from_le_bytes([offset_lo, offset_hi]);
        idx = copy_back_reference(&mut output, idx, offset, repeat_count)?;
    }

    let end = match read_end_marker(&mut bits) {
        Ok(true) => DietEnd::Marker,
        Ok(false) => DietEnd::Unterminated,
        Err(SqzError::Truncated(_)) => DietEnd::EndOfStream,
        Err(e) => return Err(e),
    };
    Ok(DietOutput {
        data: output,
        produced: idx,
        end,
    })
}

/// Literal flag, short-form flag, low byte `0xFF`, clear high-byte selector.
fn read_end_marker<R: Read + ?Sized>(bits: &mut DietBitReader<'_, R>) -> Result<bool> {
    if bits.read_bit()? || bits.read_bit()? {
        return Ok(false);
    }
    let low = bits.read_next_byte()?;
    Ok(low == END_MARKER && !bits.read_bit()?)
}

/// Copy `count` bytes from `idx + offset` to `idx`, one at a time, stopping
/// at the end of the buffer. Returns the new write position.
pub(crate) fn copy_back_reference(
    output: &mut [u8],
    idx: usize,
    offset: i16,
    count: usize,
) -> Result<usize> {
    let distance = offset.unsigned_abs() as usize;
    if offset >= 0 || distance > idx {
        return Err(SqzError::MalformedBackReference {
            offset,
            position: idx,
        });
    }

    let mut source = idx - distance;
    let mut dest = idx;
    for _ in 0..count {
        if dest >= output.len() {
            break;
        }
        output[dest] = output[source];
        dest += 1;
        source += 1;
    }
    Ok(dest)
}

fn shift_in(byte: u8, bit: bool) -> u8 {
    (byte << 1) | bit as u8
}

/// Long-form offset high byte: starts at `0xFF`, shifts in one bit, then up to
/// three more guarded by a stop bit, subtracting the matching power of two.
fn read_offset_high<R: Read + ?Sized>(bits: &mut DietBitReader<'_, R>) -> Result<u8> {
    let mut high = shift_in(0xFF, bits.read_bit()?);

    if !bits.read_bit()? {
        let mut bias: u8 = 2;
        for _ in 0..3 {
            if bits.read_bit()? {
                break;
            }
            high = shift_in(high, bits.read_bit()?);
            bias <<= 1;
        }
        high = high.wrapping_sub(bias);
    }
    Ok(high)
}

/// Variable-length repeat count (before the implicit +2): 1..=4 unary,
/// 5..=6 with one extra bit, 7..=14 with three bits, 15..=270 with a raw byte.
fn read_repeat_count<R: Read + ?Sized>(bits: &mut DietBitReader<'_, R>) -> Result<usize> {
    for count in 1..=4 {
        if bits.read_bit()? {
            return Ok(count);
        }
    }

    if bits.read_bit()? {
        Ok(if bits.read_bit()? { 6 } else { 5 })
    } else if !bits.read_bit()? {
        Ok(7 + bits.read_3bit_value()? as usize)
    } else {
        Ok(15 + bits.read_next_byte()? as usize)
    }
}
