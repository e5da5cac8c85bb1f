//! Unpack one SQZ/TRK container to a raw file.
//!
//! Usage: sqz_extract <input> [output] [--alt-lzw] [--strict]
//!
//! Set `RUST_LOG=debug` to see header details.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sqz_unpack::{LzwVariant, SqzReader, SqzReaderConfiguration};

#[derive(Parser, Debug)]
#[command(version, about = "Unpack an SQZ/TRK container")]
struct Args {
    /// Container to unpack
    input: PathBuf,

    /// Output file (defaults to the input with a .BIN extension)
    output: Option<PathBuf>,

    /// Use the alternate LZW code assignment (clear 0x101, end 0x100)
    #[arg(long)]
    alt_lzw: bool,

    /// Fail when an LZW/Huffman payload does not match the declared size
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = SqzReaderConfiguration {
        lzw_variant: if args.alt_lzw {
            LzwVariant::Alternate
        } else {
            LzwVariant::Standard
        },
        strict_payload_size: args.strict,
    };

    let reader = SqzReader::from_file(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?
        .with_config(config);
    let header = *reader.header();

    let (data, notifications) = reader
        .read_with_notifications()
        .with_context(|| format!("unpacking {}", args.input.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("BIN"));
    std::fs::write(&output, &data)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{}: {} payload, {} bytes declared, {} bytes written to {}",
        args.input.display(),
        header.format,
        header.payload_size,
        data.len(),
        output.display()
    );
    for n in &notifications {
        println!("  {n}");
    }
    Ok(())
}
