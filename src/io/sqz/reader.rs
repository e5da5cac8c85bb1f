//! SQZ reader: the entry point for unpacking a container.
//!
//! Reads the header, selects the payload codec once, and decodes the rest of
//! the stream into a single buffer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sqz_unpack::io::sqz::SqzReader;
//!
//! let data = SqzReader::from_file("sqz/LEVEL1.SQZ")?.read()?;
//! ```

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::Path;

use crate::error::{Result, SqzError};
use crate::notification::{NotificationCollection, NotificationType};

use super::compression::diet::{decompress_diet_with_end, DietEnd};
use super::compression::huffman_rle::decompress_huffman_rle_with_tail;
use super::compression::lzw::{decompress_lzw, LzwVariant};
use super::header::{SqzFormat, SqzHeader};

/// Bytes examined after the end of a stream when looking for trailing data.
const TRAILING_SCAN_LIMIT: u64 = 64 * 1024;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the SQZ reader.
#[derive(Debug, Clone, Default)]
pub struct SqzReaderConfiguration {
    /// Clear/end code assignment for LZW payloads.
    ///
    /// Default: [`LzwVariant::Standard`].
    pub lzw_variant: LzwVariant,

    /// When `true`, an LZW or Huffman payload whose decoded length differs
    /// from the header fails with [`SqzError::PayloadSizeMismatch`] instead of
    /// being reported as a notification.
    ///
    /// Default: `false`.
    pub strict_payload_size: bool,
}

// ---------------------------------------------------------------------------
// SqzReader
// ---------------------------------------------------------------------------

/// Unpacks one SQZ/TRK container.
pub struct SqzReader<R: Read> {
    reader: R,
    header: SqzHeader,
    config: SqzReaderConfiguration,
    notifications: NotificationCollection,
}

impl SqzReader<BufReader<File>> {
    /// Open a container file and read its header.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "opening container");
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read> SqzReader<R> {
    /// Read the header from any byte stream.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let header = SqzHeader::read(&mut reader)?;
        tracing::debug!(
            format = %header.format,
            payload_size = header.payload_size,
            "container header"
        );
        Ok(Self {
            reader,
            header,
            config: SqzReaderConfiguration::default(),
            notifications: NotificationCollection::new(),
        })
    }

    pub fn with_config(mut self, config: SqzReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn header(&self) -> &SqzHeader {
        &self.header
    }

    /// Decode the payload.
    pub fn read(self) -> Result<Vec<u8>> {
        self.read_with_notifications().map(|(data, _)| data)
    }

    /// Decode the payload and return the non-fatal findings alongside it.
    pub fn read_with_notifications(mut self) -> Result<(Vec<u8>, NotificationCollection)> {
        let payload_size = self.header.payload_size;

        let data = match self.header.format {
            SqzFormat::Lzw => {
                let data = decompress_lzw(&mut self.reader, payload_size, self.config.lzw_variant)?;
                self.check_advisory_size(data.len())?;
                data
            }
            SqzFormat::HuffmanRle => {
                let decoded = decompress_huffman_rle_with_tail(&mut self.reader, payload_size)?;
                if decoded.has_partial_codeword() {
                    self.notifications.notify(
                        NotificationType::PartialCodeword,
                        format!("stream ended {} bits into a codeword", decoded.tail_bits),
                    );
                }
                self.check_advisory_size(decoded.data.len())?;
                decoded.data
            }
            SqzFormat::Diet => {
                let decoded = decompress_diet_with_end(&mut self.reader, payload_size)?;
                if decoded.produced < payload_size {
                    self.notifications.notify(
                        NotificationType::EarlyEndOfStream,
                        format!("end marker after {} of {payload_size} bytes", decoded.produced),
                    );
                }
                if decoded.end == DietEnd::Unterminated {
                    self.notifications.notify(
                        NotificationType::MissingEndMarker,
                        format!("no end marker after the last of {payload_size} bytes"),
                    );
                }
                decoded.data
            }
        };

        if payload_size > 0 {
            self.check_trailing_data();
        }

        Ok((data, self.notifications))
    }

    fn check_advisory_size(&mut self, actual: usize) -> Result<()> {
        let expected = self.header.payload_size;
        if actual == expected {
            return Ok(());
        }
        if self.config.strict_payload_size {
            return Err(SqzError::PayloadSizeMismatch { expected, actual });
        }
        self.notifications.notify(
            NotificationType::PayloadSizeMismatch,
            format!("header declares {expected} bytes, decoded {actual}"),
        );
        Ok(())
    }

    /// Count what is left in the source, up to [`TRAILING_SCAN_LIMIT`] bytes.
    fn check_trailing_data(&mut self) {
        let format = self.header.format;
        let mut rest = (&mut self.reader).take(TRAILING_SCAN_LIMIT);
        match io::copy(&mut rest, &mut io::sink()) {
            Ok(0) => {}
            Ok(TRAILING_SCAN_LIMIT) => self.notifications.notify(
                NotificationType::TrailingData,
                format!("at least {TRAILING_SCAN_LIMIT} unread bytes after the end of the {format} stream"),
            ),
            Ok(unread) => self.notifications.notify(
                NotificationType::TrailingData,
                format!("{unread} unread bytes after the end of the {format} stream"),
            ),
            Err(e) => self.notifications.notify(
                NotificationType::TrailingReadFailed,
                format!("reading past the {format} stream failed: {e}"),
            ),
        }
    }
}

/// Unpack a container file.
pub fn unpack<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    SqzReader::from_file(path)?.read()
}

/// Unpack an in-memory container.
pub fn unpack_bytes(data: &[u8]) -> Result<Vec<u8>> {
    SqzReader::from_reader(Cursor::new(data))?.read()
}
