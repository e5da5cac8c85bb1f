//! # sqz-unpack
//!
//! A pure Rust library for unpacking the compressed containers (`*.SQZ`,
//! `*.TRK`) found in archived game data: tile graphics, sprites, level maps,
//! music tracks and images.
//!
//! ## Features
//!
//! - LZW payloads (TTF type `0x10`), both clear/end code assignments
//! - Huffman + run-length payloads (other TTF types)
//! - DIET payloads with exact declared output size
//! - Distinct errors for missing files, truncated streams and format violations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sqz_unpack::unpack;
//!
//! let level = unpack("sqz/LEVEL1.SQZ")?;
//! println!("{} bytes", level.len());
//! # Ok::<(), sqz_unpack::SqzError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`SqzHeader`] detects the format and the declared payload size
//! - [`SqzReader`] picks the decoder once and produces one owned buffer
//! - [`io::sqz::bit_reader`] holds one cursor type per bit-packing convention
//! - [`SqzLibrary`] resolves named assets in a data directory
//!
//! Every call is independent: dictionaries, trees and buffers are allocated
//! per call, so decoding is reentrant without any locking.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod notification;

// Re-export commonly used types
pub use error::{Result, SqzError};
pub use io::sqz::{
    unpack, unpack_bytes, Decompressor, LzwVariant, SqzFormat, SqzHeader, SqzLibrary,
    SqzReader, SqzReaderConfiguration,
};
pub use notification::{Notification, NotificationCollection, NotificationType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
