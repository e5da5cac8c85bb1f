//! Diagnostic: print the header of each container given on the command line,
//! then try to unpack it.
use sqz_unpack::{SqzError, SqzReader};

fn main() {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: diag_sqz_header <file.SQZ>...");
        return;
    }

    for path in &paths {
        let reader = match SqzReader::from_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{path}: HEADER FAILED: {e}");
                continue;
            }
        };

        let header = *reader.header();
        let type_byte = header
            .type_byte
            .map(|t| format!("0x{t:02X}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{path}: format={} type={type_byte} payload_size={} (0x{:X})",
            header.format, header.payload_size, header.payload_size
        );

        match reader.read_with_notifications() {
            Ok((data, notes)) => {
                println!("  decoded {} bytes", data.len());
                if let Some(first) = data.chunks(16).next() {
                    print!("  0000: ");
                    for b in first {
                        print!("{b:02X} ");
                    }
                    println!();
                }
                for n in &notes {
                    println!("  {n}");
                }
            }
            Err(e @ SqzError::Io(_)) => eprintln!("  READ FAILED: {e}"),
            Err(e) => eprintln!("  CORRUPT: {e}"),
        }
    }
}
