//! Frame dump utility
//! Matches a captured Ethernet-II/IPv4 frame against a declared header
//! pattern and prints the decoded fields plus a hex dump of the payload

use binmatch::{BitFieldGroup, BitVec, Pattern};
use std::env;
use std::fs;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <frame.bin>", args[0]);
        eprintln!("\nMatches the file against an Ethernet-II/IPv4 header pattern");
        eprintln!("and prints the decoded fields and payload.");
        std::process::exit(1);
    }

    let frame_file = &args[1];
    println!("Reading frame file: {}", frame_file);
    let data = fs::read(frame_file)?;
    println!("Loaded {} bytes\n", data.len());

    // Caller-owned targets the pattern writes into
    let mut dst_mac = [0u8; 6];
    let mut src_mac = [0u8; 6];
    let mut ihl = BitVec::new(4);
    let mut version = BitVec::new(4);
    let mut ecn = BitVec::new(2);
    let mut dscp = BitVec::new(6);
    let mut total_len = 0u16;
    let mut payload_at = None;

    // EtherType 0x0800 (IPv4) as it sits on the wire; literals compare
    // without byte-order conversion
    let ethertype_ipv4 = u16::from_ne_bytes([0x08, 0x00]);

    let matched = {
        // Packed IPv4 nibbles: the low nibble of the first byte is the
        // header length, the high nibble the version
        let ver_ihl = BitFieldGroup::new(vec![&mut ihl, &mut version])?;
        let tos = BitFieldGroup::new(vec![&mut ecn, &mut dscp])?;

        let mut pattern = Pattern::builder()
            .capture_into(&mut dst_mac)
            .capture_into(&mut src_mac)
            .literal(ethertype_ipv4)
            .bit_field(ver_ihl)
            .bit_field(tos)
            .assign_net_into(&mut total_len)
            .payload_into(&mut payload_at)
            .build();

        tracing::debug!("header pattern covers {} bytes", pattern.size());
        anyhow::ensure!(
            data.len() >= pattern.size(),
            "file too short: {} bytes, header needs {}",
            data.len(),
            pattern.size()
        );

        pattern.matches(&data)
    };

    if !matched {
        println!("No match: frame is not IPv4 over Ethernet-II");
        std::process::exit(1);
    }

    println!("=== Decoded Header ===");
    println!("Destination:   {}", mac_string(&dst_mac));
    println!("Source:        {}", mac_string(&src_mac));
    println!("IP version:    {}", version.value());
    println!("Header length: {} words", ihl.value());
    println!("DSCP:          {}", dscp.value());
    println!("ECN:           {}", ecn.value());
    println!("Total length:  {} bytes", total_len);
    println!();

    let Some(at) = payload_at else {
        anyhow::bail!("match succeeded but no payload position was recorded");
    };
    let payload = &data[at..];
    println!("Payload at byte {} ({} bytes)", at, payload.len());

    print!("First {} bytes:  ", payload.len().min(32));
    for (i, byte) in payload.iter().take(32).enumerate() {
        print!("{:02X} ", byte);
        if i == 7 || i == 15 || i == 23 {
            print!(" ");
        }
    }
    println!();

    Ok(())
}

fn mac_string(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
