//! Shared test utilities for sqz-unpack integration tests.
//!
//! Container wrappers and output paths live here; the payload assemblers are
//! in [`builders`].

#![allow(dead_code)]

pub mod builders;

use std::path::PathBuf;

/// Resolve a path inside `test_output/`, creating the directory if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

/// A fresh, empty directory under `test_output/`.
pub fn test_output_dir(name: &str) -> PathBuf {
    let dir = test_output_path(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("Failed to create test output directory");
    dir
}

// ===========================================================================
// Container headers
// ===========================================================================

/// TTF container: size high nibble, type byte, little-endian size low word.
pub fn ttf_container(type_byte: u8, payload_size: usize, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![((payload_size >> 16) & 0x0F) as u8, type_byte];
    out.extend_from_slice(&((payload_size & 0xFFFF) as u16).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn lzw_container(payload_size: usize, payload: &[u8]) -> Vec<u8> {
    ttf_container(0x10, payload_size, payload)
}

pub fn huffman_container(payload_size: usize, payload: &[u8]) -> Vec<u8> {
    ttf_container(0x00, payload_size, payload)
}

/// DIET container: signature block, reserved byte, checksum, size fields.
pub fn diet_container(payload_size: usize, bitstream: &[u8]) -> Vec<u8> {
    let mut out = vec![0xB4, 0x4C, 0xCB, 0x00, 0x9D, 0x00, 0x05, 0x44, 0x4C];
    out.push(0x5A);
    out.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    out.push((((payload_size >> 16) & 0x1F) << 2) as u8);
    out.extend_from_slice(&((payload_size & 0xFFFF) as u16).to_le_bytes());
    out.extend_from_slice(bitstream);
    out
}

/// Write `data` to `test_output/<filename>` and return the path.
pub fn write_fixture(filename: &str, data: &[u8]) -> PathBuf {
    let path = test_output_path(filename);
    std::fs::write(&path, data).expect("Failed to write fixture");
    path
}
