//! I/O module for reading SQZ/TRK containers

pub mod sqz;

pub use sqz::{SqzLibrary, SqzReader, SqzReaderConfiguration};
