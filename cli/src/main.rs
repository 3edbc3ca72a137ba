//! argcodec CLI: encode and decode contract argument lists.
//!
//! # Commands
//! ```text
//! argcodec encode        --args <inputs.json> --values <json> [--function <name>]
//! argcodec address-list  --args <inputs.json> --values <json>
//! argcodec decode        --args <inputs.json> --data <hex> [--json]
//! argcodec decode-batch  --args <inputs.json> --input <file> [--threads N]
//! argcodec signature     --args <inputs.json> --name <name>
//! argcodec info
//! ```
//!
//! `<inputs.json>` is a JSON array of argument fragments, the `inputs` or
//! `outputs` array of a contract ABI entry.

use anyhow::{Context, Result};
use argcodec_abi::{event_topic, function_selector, Argument, Arguments, DynSolValue};
use argcodec_core::json::{from_json, to_json_named};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

mod cmd_batch;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "argcodec",
    about = "Contract argument-list encoder/decoder",
    long_about = "
argcodec: pack and unpack EVM contract argument lists (head/tail ABI layout).

ENVIRONMENT VARIABLES:
  RUST_LOG    Overrides the log filter from --config / --verbose
",
    version
)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file with a `log` section
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode values against an argument list
    Encode {
        /// Path to the argument list JSON
        #[arg(long)]
        args: PathBuf,
        /// JSON array of values, e.g. '["0xabc...", "1000000"]'
        #[arg(long)]
        values: String,
        /// Prefix the output with this function's 4-byte selector
        #[arg(long)]
        function: Option<String>,
    },

    /// Encode the addresses embedded in the values as a counted list
    #[command(name = "address-list")]
    AddressList {
        #[arg(long)]
        args: PathBuf,
        #[arg(long)]
        values: String,
    },

    /// Decode an encoded argument list
    Decode {
        #[arg(long)]
        args: PathBuf,
        /// Encoded payload (0x-prefixed hex), without selector
        #[arg(long)]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode one hex payload per line, in parallel; prints JSON lines
    #[command(name = "decode-batch")]
    DecodeBatch {
        #[arg(long)]
        args: PathBuf,
        /// File with one 0x-prefixed payload per line
        #[arg(long)]
        input: PathBuf,
        /// Number of parallel Rayon threads (0 = use default)
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },

    /// Print the canonical signature, function selector and event topic
    Signature {
        #[arg(long)]
        args: PathBuf,
        /// Function or event name
        #[arg(long)]
        name: String,
    },

    /// Show build and capability info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.log.level = "debug".into();
    }
    argcodec_observability::init_tracing(&config.log);
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Encode { args, values, function } => {
            cmd_encode(&args, &values, function.as_deref())
        }
        Commands::AddressList { args, values } => cmd_address_list(&args, &values),
        Commands::Decode { args, data, json } => cmd_decode(&args, &data, json),
        Commands::DecodeBatch { args, input, threads } => {
            cmd_batch::run(&load_arguments(&args)?, &input, threads)
        }
        Commands::Signature { args, name } => cmd_signature(&args, &name),
        Commands::Info => cmd_info(),
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn load_arguments(path: &Path) -> Result<Arguments> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read argument file '{}'", path.display()))?;
    Arguments::from_json(&raw).with_context(|| format!("parse argument file '{}'", path.display()))
}

fn parse_values(args: &Arguments, values_json: &str) -> Result<Vec<DynSolValue>> {
    let json: Vec<serde_json::Value> =
        serde_json::from_str(values_json).context("parse values JSON (expected an array)")?;
    if json.len() != args.len() {
        anyhow::bail!("expected {} values, got {}", args.len(), json.len());
    }
    args.iter()
        .zip(&json)
        .map(|(arg, v)| {
            from_json(&arg.ty, &arg.components, v)
                .with_context(|| format!("value for argument '{}' ({})", arg.name, arg.ty))
        })
        .collect()
}

pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).context("invalid hex")
}

/// Decode the non-indexed arguments in order, each keyed by its name or, when
/// unnamed, by its position.
pub(crate) fn decode_keyed<'a>(
    args: &'a Arguments,
    bytes: &[u8],
) -> Result<Vec<(String, &'a Argument, DynSolValue)>> {
    let values = args.unpack_values(bytes)?;
    Ok(args
        .non_indexed()
        .zip(values)
        .enumerate()
        .map(|(i, (arg, value))| {
            let key = if arg.name.is_empty() {
                i.to_string()
            } else {
                arg.name.clone()
            };
            (key, arg, value)
        })
        .collect())
}

/// JSON rendering of a decoded value; tuples become objects keyed by component.
pub(crate) fn value_json(arg: &Argument, value: &DynSolValue) -> Value {
    to_json_named(value, &arg.components)
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_encode(args_path: &Path, values_json: &str, function: Option<&str>) -> Result<()> {
    let args = load_arguments(args_path)?;
    let values = parse_values(&args, values_json)?;

    let mut out = Vec::new();
    if let Some(name) = function {
        out.extend_from_slice(&function_selector(name, &args));
    }
    out.extend(args.pack(&values)?);
    println!("0x{}", hex::encode(&out));
    Ok(())
}

fn cmd_address_list(args_path: &Path, values_json: &str) -> Result<()> {
    let args = load_arguments(args_path)?;
    let values = parse_values(&args, values_json)?;
    let prefix = args.pack_prefix(&values)?;
    println!("0x{}", hex::encode(&prefix));
    Ok(())
}

fn cmd_decode(args_path: &Path, data: &str, as_json: bool) -> Result<()> {
    let args = load_arguments(args_path)?;
    let bytes = decode_hex(data).context("invalid data hex")?;
    println!("{}", render_decoded(&args, &bytes, as_json)?);
    Ok(())
}

fn render_decoded(args: &Arguments, bytes: &[u8], as_json: bool) -> Result<String> {
    let decoded = decode_keyed(args, bytes)?;

    if as_json {
        let out: serde_json::Map<String, Value> = decoded
            .iter()
            .map(|(key, arg, value)| (key.clone(), value_json(arg, value)))
            .collect();
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    let mut lines = vec![
        format!("Signature: {}", args.without_indexed().signature()),
        "Values:".to_string(),
    ];
    for (key, arg, value) in &decoded {
        let rendered = match value_json(arg, value) {
            Value::String(s) => s,
            other => other.to_string(),
        };
        lines.push(format!("  {key} ({}): {rendered}", arg.ty));
    }
    Ok(lines.join("\n"))
}

fn cmd_signature(args_path: &Path, name: &str) -> Result<()> {
    let args = load_arguments(args_path)?;
    println!("Signature: {}{}", name, args.signature());
    println!("Selector:  0x{}", hex::encode(function_selector(name, &args)));
    println!("Topic:     0x{}", hex::encode(event_topic(name, &args)));
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("argcodec v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Capabilities:");
    println!("  ✓ Argument-list encoding    (head/tail, static arrays inlined)");
    println!("  ✓ Address-list prefix       (u16 count + 20-byte records)");
    println!("  ✓ Argument-list decoding    (indexed arguments skipped)");
    println!("  ✓ Struct / slice / map destinations");
    println!("  ✓ Function selectors and event topics (keccak256)");
    println!("  ✓ Parallel batch decode     (Rayon)");
    println!();
    println!("Types: uint8..uint256, int8..int256, bool, address, bytes1..bytes32,");
    println!("       bytes, string, T[N], T[], tuple");
    Ok(())
}
