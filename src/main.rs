//! msgwire - demo & inspection CLI
//!
//! Subcommands:
//! - `demo`: encode + decode contoh message, print bytes dan hasilnya
//! - `encode`: tulis message ke file
//! - `inspect`: mmap file dan decode
//! - `bench`: encode/decode latency sederhana
//!
//! Logging lewat `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use msgwire::storage::{write_message, MappedMessage};
use msgwire::{CodecLimits, Headers, Message, MessageCodec};

#[derive(Parser)]
#[command(name = "msgwire", version, about = "Binary header + payload message codec")]
struct Cli {
    #[command(flatten)]
    limits: LimitArgs,

    #[command(subcommand)]
    command: Command,
}

/// Encode-time limits (defaults: 63 / 1023 / 256 KiB / 256 KiB)
#[derive(Args)]
struct LimitArgs {
    #[arg(long, global = true, default_value_t = msgwire::protocol::MAX_HEADERS)]
    max_headers: u8,

    #[arg(long, global = true, default_value_t = msgwire::protocol::MAX_HEADER_FIELD_SIZE)]
    max_field_size: u16,

    #[arg(long, global = true, default_value_t = msgwire::protocol::MAX_HEADER_SECTION_SIZE)]
    max_header_section_size: usize,

    #[arg(long, global = true, default_value_t = msgwire::protocol::MAX_PAYLOAD_SIZE)]
    max_payload_size: usize,
}

impl LimitArgs {
    fn to_limits(&self) -> CodecLimits {
        CodecLimits::default()
            .with_max_headers(self.max_headers)
            .with_max_field_size(self.max_field_size)
            .with_max_header_section_size(self.max_header_section_size)
            .with_max_payload_size(self.max_payload_size)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Round-trip the built-in sample message
    Demo,
    /// Encode a message into a file
    Encode {
        /// Header as `name=value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        #[arg(short, long, default_value = "")]
        payload: String,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decode a message file and print it
    Inspect { path: PathBuf },
    /// Measure encode/decode latency
    Bench {
        #[arg(long, default_value_t = 100_000)]
        iterations: usize,

        #[arg(long, default_value_t = 64)]
        payload_size: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let codec = MessageCodec::new(cli.limits.to_limits());
    debug!(limits = ?codec.limits(), "codec configured");

    match cli.command {
        Command::Demo => run_demo(&codec),
        Command::Encode {
            headers,
            payload,
            output,
        } => run_encode(&codec, &headers, payload, &output),
        Command::Inspect { path } => run_inspect(&codec, &path),
        Command::Bench {
            iterations,
            payload_size,
        } => {
            run_bench(&codec, iterations, payload_size);
            Ok(())
        }
    }
}

fn sample_message() -> Message {
    Message::new(Headers::new(), "This is the binary payload of the message.")
        .with_header("Content-Type", "text/plain")
        .with_header("Authorization", "Bearer ABCDEFG123456789")
        .with_header("Custom-Header", "Hello, Custom!")
}

fn run_demo(codec: &MessageCodec) -> Result<()> {
    let message = sample_message();

    let encoded = codec.encode(&message).context("encoding sample message")?;
    println!("Encoded ({} bytes):", encoded.len());
    println!("{}", hex_dump(&encoded));

    // Sisi penerima
    let decoded = codec.decode(&encoded).context("decoding sample message")?;
    print_message(&decoded);

    if decoded != message {
        bail!("round-trip mismatch");
    }
    info!("round-trip ok");
    Ok(())
}

fn run_encode(
    codec: &MessageCodec,
    raw_headers: &[String],
    payload: String,
    output: &Path,
) -> Result<()> {
    let mut headers = Headers::new();
    for raw in raw_headers {
        let (name, value) = raw
            .split_once('=')
            .with_context(|| format!("header `{raw}` is not in name=value form"))?;
        headers.insert(name.to_string(), value.to_string());
    }

    let message = Message::new(headers, payload);
    let written = write_message(output, codec, &message)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(path = %output.display(), bytes = written, "message written");
    Ok(())
}

fn run_inspect(codec: &MessageCodec, path: &Path) -> Result<()> {
    let mapped =
        MappedMessage::open(path).with_context(|| format!("opening {}", path.display()))?;
    let message = mapped
        .decode(codec)
        .with_context(|| format!("decoding {}", path.display()))?;

    println!("File: {} ({} bytes)", path.display(), mapped.len());
    print_message(&message);
    Ok(())
}

fn run_bench(codec: &MessageCodec, iterations: usize, payload_size: usize) {
    println!("📊 Codec Benchmark");
    println!("------------------");

    let message = Message::new(sample_message().headers, "x".repeat(payload_size));

    // Buffer di-reuse antar iterasi
    let mut buffer = Vec::with_capacity(message.encoded_len());
    let start = Instant::now();
    for _ in 0..iterations {
        buffer.clear();
        if codec.encode_into(&message, &mut buffer).is_err() {
            println!("  Message exceeds configured limits, nothing to measure");
            return;
        }
    }
    let encode_duration = start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = codec.decode(&buffer);
    }
    let decode_duration = start.elapsed();

    let encode_ns = encode_duration.as_nanos() as f64 / iterations.max(1) as f64;
    let decode_ns = decode_duration.as_nanos() as f64 / iterations.max(1) as f64;

    println!("  Message size: {} bytes", buffer.len());
    println!("  Operations:   {}", iterations);
    println!(
        "  Encode latency: {:.2} ns/op ({:.3} μs/op)",
        encode_ns,
        encode_ns / 1000.0
    );
    println!(
        "  Decode latency: {:.2} ns/op ({:.3} μs/op)",
        decode_ns,
        decode_ns / 1000.0
    );
    println!(
        "  Encode throughput: {:.2} M msgs/sec",
        iterations as f64 / encode_duration.as_secs_f64() / 1_000_000.0
    );
}

fn print_message(message: &Message) {
    println!("Headers ({}):", message.header_count());
    for (name, value) in &message.headers {
        println!("  {name}: {value}");
    }
    println!("Payload ({} bytes):", message.payload.len());
    println!("  {}", message.payload);
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
            format!("  {:08x}  {}", row * 16, hex.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
