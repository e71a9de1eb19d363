use anyhow::Context;
use clap::{Parser, Subcommand};
use sml_rs::payload::record::{pack_record, TypeMarker};
use sml_rs::sml::frame::pack_frame;
use sml_rs::util::hex::decode_hex;
use sml_rs::{
    decode_reading, init_logger_with_level, log_error, log_info, ChecksumPolicy, MeterConfig,
    MeterReader,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sml-cli")]
#[command(about = "CLI tool for reading SML electricity meters")]
struct Cli {
    /// JSON config file (device, loglevel, checksum_policy, baudrate, ...)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// How to treat the frame CRC (strict, warn, ignore)
    #[arg(long, global = true)]
    checksum: Option<ChecksumPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one window from the meter and print the reading as JSON
    Read {
        /// Serial device of the reading head
        #[arg(short, long)]
        device: Option<String>,
        #[arg(short, long)]
        baudrate: Option<u32>,
    },
    /// Decode a captured window (hex text or raw bytes)
    Decode { file: PathBuf },
    /// Decode a built-in sample frame
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MeterConfig::load_settings(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MeterConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(policy) = cli.checksum {
        config.checksum_policy = policy;
    }
    config.validate_settings()?;
    init_logger_with_level(&config.log_level)?;

    match cli.command {
        Commands::Read { device, baudrate } => {
            if let Some(device) = device {
                config.device = device;
            }
            if config.device.is_empty() {
                config.device = sml_rs::config::DEFAULT_DEVICE.to_string();
            }
            if let Some(baudrate) = baudrate {
                config.baudrate = baudrate;
            }
            log_info(&format!("Reading meter on {}", config.device));
            let mut reader = MeterReader::open(&config).await?;
            let sample = match reader.read_sample().await {
                Ok(sample) => sample,
                Err(e) => {
                    log_error(&format!("Failed to read meter on {}: {e}", config.device));
                    return Err(e.into());
                }
            };
            println!("{}", serde_json::to_string_pretty(&sample)?);
        }
        Commands::Decode { file } => {
            let content =
                std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let window = match std::str::from_utf8(&content) {
                Ok(text) if text.chars().all(|c| c.is_ascii_hexdigit() || c.is_whitespace()) => {
                    decode_hex(text).context("decoding hex dump")?
                }
                _ => content,
            };
            let reading = decode_reading(&window, config.checksum_policy)?;
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        Commands::Demo => {
            let records = [
                ("0100010800", TypeMarker::EnergyWithStatus, 0x0517_E31B),
                ("0100010801", TypeMarker::Energy, 0x0517_E31B),
                ("0100010802", TypeMarker::Energy, 0),
                ("0100100700", TypeMarker::Power, 0x21D),
                ("0100240700", TypeMarker::Power, 0xBC),
                ("0100380700", TypeMarker::Power, 0xA8),
                ("01004C0700", TypeMarker::Power, 0xB9),
            ];
            let payload: String = records
                .iter()
                .map(|(id, marker, value)| pack_record(id, *marker, *value))
                .collect();
            let window = pack_frame(&decode_hex(&payload)?)?;
            let reading = decode_reading(&window, config.checksum_policy)?;
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
    }

    Ok(())
}
