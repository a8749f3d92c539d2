//! `confjson` CLI: check, format, and inspect JSON configuration files.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a file (stdin if -i is omitted)
//! confjson check -i config.json
//!
//! # Rewrite in canonical form, pretty or compact
//! confjson format -i config.json -o config.json
//! confjson format --compact < config.json
//!
//! # List every entry with its decoded width/kind
//! confjson inspect -i config.json
//!
//! # Print one entry by dotted path
//! confjson get server.port -i config.json
//!
//! # Accept objects of a type the CLI does not know
//! confjson --alias Location check -i world.json
//! ```
//!
//! Logs go to stderr. `RUST_LOG` controls the filter; `--verbose` forces `debug`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confjson_core::{
    decode_root, document, encode_to_string, encode_to_string_pretty, ConfigValue, Fields,
    JsonConfiguration, Registry,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "confjson",
    version,
    about = "Width-preserving JSON configuration CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Register an object type alias that accepts any fields (repeatable)
    #[arg(long = "alias", value_name = "NAME", global = true)]
    aliases: Vec<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration and report how many entries it holds
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Decode and re-encode a document in canonical form
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Single-line output instead of indented
        #[arg(long)]
        compact: bool,
    },
    /// Print every entry path with its decoded kind
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the JSON encoding of the entry at a dotted path
    Get {
        /// Dotted path, e.g. `server.limits.max`
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut registry = Registry::with_builtins();
    for alias in &cli.aliases {
        registry.register_passthrough(alias);
    }
    debug!(aliases = ?registry.aliases(), "registry ready");

    match cli.command {
        Commands::Check { input } => {
            let config = load_config(input.as_deref(), &registry)?;
            println!(
                "OK: {} top-level entries, {} total",
                config.len(),
                config.keys(true).len()
            );
        }
        Commands::Format {
            input,
            output,
            compact,
        } => {
            let text = read_input(input.as_deref())?;
            let node = document::parse(&text).context("Failed to parse JSON")?;
            let fields = decode_root(&node, &registry).context("Failed to decode document")?;
            let value = ConfigValue::Mapping(fields);
            let mut formatted = if compact {
                encode_to_string(&value, &registry)
            } else {
                encode_to_string_pretty(&value, &registry)
            }
            .context("Failed to encode document")?;
            formatted.push('\n');
            write_output(output.as_deref(), &formatted)?;
        }
        Commands::Inspect { input } => {
            let config = load_config(input.as_deref(), &registry)?;
            let mut lines = Vec::new();
            describe_entries(config.entries(), "", &mut lines);
            for line in lines {
                println!("{line}");
            }
        }
        Commands::Get { path, input } => {
            let config = load_config(input.as_deref(), &registry)?;
            let value = config
                .get(&path)
                .with_context(|| format!("No entry at path: {path}"))?;
            let json = encode_to_string_pretty(value, &registry)
                .context("Failed to encode entry")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(input: Option<&str>, registry: &Registry) -> Result<JsonConfiguration> {
    let text = read_input(input)?;
    let mut config = JsonConfiguration::new();
    config
        .load_from_str(&text, registry)
        .context("Failed to load configuration")?;
    Ok(config)
}

/// One line per entry: `path: kind`. Sections recurse instead of printing a line;
/// objects show their alias and sequences their length.
fn describe_entries(fields: &Fields, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in fields {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            ConfigValue::Section(child) => describe_entries(child, &path, out),
            ConfigValue::Polymorphic(obj) => out.push(format!("{path}: object({})", obj.alias)),
            ConfigValue::Sequence(items) => out.push(format!("{path}: sequence[{}]", items.len())),
            other => out.push(format!("{path}: {}", other.kind())),
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
