use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mbid_core::constants::{CJK_HIGH_ENV, CJK_LOW_ENV, ENCODING_ENV};
use mbid_core::{CodecConfig, CompactIdService, Encoding, UuidOctets};

#[derive(Parser)]
#[command(name = "mbid")]
#[command(about = "Compact encodings for UUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a UUID in a compact form
    Encode {
        /// UUID, hyphenated or 32 hex digits
        uuid: String,
        /// base64, wide, cjk or rfc4648 (defaults to MBID_ENCODING)
        #[arg(long, short)]
        encoding: Option<Encoding>,
    },
    /// Decode a compact form back to a UUID
    Decode {
        /// Compact string
        compact: String,
        /// Encoding of the compact string (detected when omitted)
        #[arg(long, short)]
        encoding: Option<Encoding>,
    },
    /// Convert a compact form to another encoding
    Reencode {
        /// Compact string
        compact: String,
        /// Source encoding (detected when omitted)
        #[arg(long)]
        from: Option<Encoding>,
        /// Target encoding
        #[arg(long)]
        to: Encoding,
    },
    /// Print the 16 octets of a UUID
    Octets {
        /// UUID, hyphenated or 32 hex digits
        uuid: String,
    },
    /// Convert comma-separated digits between bases
    Convert {
        /// Digits, most significant first (e.g. 16,32,48)
        digits: String,
        /// Source base
        #[arg(long)]
        from: u32,
        /// Target base
        #[arg(long)]
        to: u32,
        /// Fixed number of output digits
        #[arg(long)]
        width: Option<usize>,
    },
    /// Generate a new UUID and its compact form
    Generate {
        /// base64, wide, cjk or rfc4648 (defaults to MBID_ENCODING)
        #[arg(long, short)]
        encoding: Option<Encoding>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved configuration as JSON
    Config,
}

/// Entry point for the `mbid` command line tool.
///
/// Configuration is resolved once from the environment (a `.env` file is honoured) and handed
/// to [`CompactIdService`].
///
/// # Environment Variables
/// - `MBID_CJK_LOW`: first codepoint of the CJK alphabet (default: "U+4E00")
/// - `MBID_CJK_HIGH`: last codepoint of the CJK alphabet (default: "U+9FCA")
/// - `MBID_ENCODING`: default encoding (default: "base64")
/// - `RUST_LOG`: log filter; logs go to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mbid=info".parse()?)
                .add_directive("mbid_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = CodecConfig::from_env_values(
        std::env::var(CJK_LOW_ENV).ok(),
        std::env::var(CJK_HIGH_ENV).ok(),
        std::env::var(ENCODING_ENV).ok(),
    )?;
    let service = CompactIdService::new(Arc::new(cfg));

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Encode { uuid, encoding }) => {
            let encoding = encoding.unwrap_or(service.config().default_encoding());
            println!("{}", service.encode(&uuid, encoding)?);
        }
        Some(Commands::Decode { compact, encoding }) => {
            let uuid = match encoding {
                Some(encoding) => service.decode(&compact, encoding)?,
                None => {
                    let (encoding, uuid) = service.decode_detect(&compact)?;
                    tracing::info!("detected {} encoding", encoding);
                    uuid
                }
            };
            println!("{}", uuid);
        }
        Some(Commands::Reencode { compact, from, to }) => {
            let from = match from {
                Some(from) => from,
                None => service
                    .detect(&compact)
                    .with_context(|| format!("could not detect the encoding of '{}'", compact))?,
            };
            println!("{}", service.reencode(&compact, from, to)?);
        }
        Some(Commands::Octets { uuid }) => {
            let octets = UuidOctets::parse(uuid.trim())?;
            println!("{}", format_octets(&octets));
        }
        Some(Commands::Convert {
            digits,
            from,
            to,
            width,
        }) => {
            let digits = parse_digits(&digits)?;
            let converted = service.convert_digits(&digits, from, to, width)?;
            println!("{}", join_digits(&converted));
        }
        Some(Commands::Generate { encoding, json }) => {
            let encoding = encoding.unwrap_or(service.config().default_encoding());
            let generated = service.generate(encoding)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else {
                println!("{} {}", generated.uuid, generated.compact);
            }
        }
        Some(Commands::Config) => {
            let summary = service.config().summary()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        None => {
            println!("Use 'mbid --help' for commands");
        }
    }

    Ok(())
}

/// Parses comma-separated decimal digits. Whitespace around digits is ignored and an empty
/// string is an empty digit sequence.
fn parse_digits(input: &str) -> anyhow::Result<Vec<u32>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|d| {
            d.trim()
                .parse::<u32>()
                .with_context(|| format!("invalid digit '{}'", d.trim()))
        })
        .collect()
}

fn join_digits(digits: &[u32]) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn format_octets(octets: &UuidOctets) -> String {
    octets
        .as_bytes()
        .iter()
        .map(|o| format!("{:02x}", o))
        .collect::<Vec<_>>()
        .join(" ")
}
