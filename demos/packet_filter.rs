//! Interactive packet-filter demo.
//!
//! Reads bytes from stdin, runs them through the framing state machine and
//! prints one line per event, mirroring the serial console of the embedded
//! deployment this engine comes from. Try:
//!
//! ```text
//! printf 'PKT:GET /x?q=UNION SELECT 1\r\nSTATUS\r\n' | cargo run --example packet_filter
//! ```

use std::io::{self, Read};

use picoscan::filter::{FilterEvent, PacketFilter};

/// The pattern set the original deployment shipped with, sized to fit the
/// default capacities.
const THREAT_PATTERNS: &[&str] = &[
    // SQL injection
    "' OR '1'='1",
    "admin'--",
    "UNION SELECT",
    "DROP TABLE",
    // XSS
    "<script>",
    "javascript:",
    "onerror=",
    // dangerous commands
    "/bin/sh",
    "cmd.exe",
    "wget ",
    "curl ",
    // network tooling
    "nc -l",
    "nmap ",
    // malware indicators
    "payload",
    "shell",
    "exploit",
    // file inclusion
    "../",
    "..\\",
];

fn main() -> io::Result<()> {
    let mut filter = match PacketFilter::new(THREAT_PATTERNS) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("ERROR: pattern set does not fit the automaton: {}", err);
            std::process::exit(1);
        }
    };

    let usage = filter.usage();
    println!("INIT: packet filter ready");
    println!(
        "  patterns loaded: {}/{}",
        usage.pattern_count, usage.pattern_capacity
    );
    println!(
        "  vertices used:   {}/{}",
        usage.vertex_count, usage.vertex_capacity
    );
    println!("commands: PKT:<data>\\r\\n | STATUS\\r\\n | VERTICES\\r\\n | RESET\\r\\n");

    for byte in io::stdin().lock().bytes() {
        let Some(event) = filter.push_byte(byte?) else {
            continue;
        };
        match event {
            FilterEvent::Packet(report) => {
                for &(pattern_index, end) in &report.matches {
                    println!(
                        "THREAT: pattern '{}' found at position {}",
                        filter.patterns()[pattern_index],
                        end
                    );
                }
                if report.matches.is_empty() {
                    println!(
                        "CLEAN: packet #{} analyzed ({} bytes) - no threats",
                        report.packet_number, report.length
                    );
                } else {
                    println!(
                        "ALERT: {} threat(s) detected in packet #{} ({} bytes)",
                        report.matches.len(),
                        report.packet_number,
                        report.length
                    );
                }
            }
            FilterEvent::Status(status) => {
                println!("STATUS:");
                println!("  packets processed: {}", status.packets_processed);
                println!("  threats detected:  {}", status.matches_found);
                println!("  patterns loaded:   {}", status.pattern_count);
                println!("  vertices used:     {}", status.vertex_count);
            }
            FilterEvent::Usage(usage) => {
                println!("VERTEX USAGE:");
                println!(
                    "  vertices: {}/{} ({:.1}%)",
                    usage.vertex_count,
                    usage.vertex_capacity,
                    usage.vertex_count as f64 * 100.0 / usage.vertex_capacity as f64
                );
                println!(
                    "  patterns: {}/{}",
                    usage.pattern_count, usage.pattern_capacity
                );
            }
            FilterEvent::CountersCleared => println!("RESET: counters cleared"),
            FilterEvent::PacketOverflow => println!("ERROR: packet too large, discarded"),
        }
    }

    Ok(())
}
