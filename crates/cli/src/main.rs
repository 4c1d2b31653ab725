//! lolgen CLI
//!
//! Command-line interface for generating a League of Legends API client from
//! the API reference document.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use lolgen_common::{GeneratorConfig, Registry};
use lolgen_generator::ClientGenerator;
use lolgen_parser::{parse_document, DocumentFormat};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "lolgen.yaml";

#[derive(Parser)]
#[command(name = "lolgen")]
#[command(version, about = "Generate a League of Legends API client from the API reference", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a reference document and display the extracted registry
    #[command(after_help = "EXAMPLES:\n  \
        # Show resources, operations and classes\n  \
        lolgen parse --doc reference.json\n\n  \
        # YAML document with a non-standard extension\n  \
        lolgen parse --doc reference.txt --format yaml")]
    Parse {
        /// Path to the reference document
        #[arg(short, long)]
        doc: PathBuf,

        /// Document format (detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<InputFormat>,

        /// Generator config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate the client source file
    #[command(after_help = "EXAMPLES:\n  \
        # Generate with the default config\n  \
        lolgen generate --doc reference.json --output src/api_gen.rs\n\n  \
        # Use a runtime module vendored into the client crate\n  \
        lolgen generate \\\n    \
        --doc reference.json \\\n    \
        --config lolgen.yaml \\\n    \
        --runtime-crate crate::runtime")]
    Generate {
        /// Path to the reference document
        #[arg(short, long)]
        doc: PathBuf,

        /// Document format (detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<InputFormat>,

        /// Generator config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "api_gen.rs")]
        output: PathBuf,

        /// Path the generated code imports the runtime from
        #[arg(long)]
        runtime_crate: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// JSON document tree
    Json,
    /// YAML document tree
    Yaml,
}

impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => DocumentFormat::Json,
            InputFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse {
            doc,
            format,
            config,
        } => {
            parse_command(&doc, format, config.as_deref(), cli.verbose)?;
        }
        Commands::Generate {
            doc,
            format,
            config,
            output,
            runtime_crate,
        } => {
            generate_command(
                &doc,
                format,
                config.as_deref(),
                &output,
                runtime_crate,
                cli.verbose,
            )?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG`; `--verbose` raises the default to debug
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn load_config(path: Option<&Path>, verbose: bool) -> Result<GeneratorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if !default.exists() {
                debug!("No config file, using defaults");
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };

    if verbose {
        println!("  Config: {}", path.display());
    }
    GeneratorConfig::load(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

fn extract(
    doc: &Path,
    format: Option<InputFormat>,
    config: &GeneratorConfig,
) -> Result<Registry> {
    parse_document(doc, format.map(DocumentFormat::from), config)
        .with_context(|| format!("Failed to extract the registry from {}", doc.display()))
}

fn parse_command(
    doc: &Path,
    format: Option<InputFormat>,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    println!("{} Parsing reference document: {}", "→".cyan(), doc.display());

    let config = load_config(config_path, verbose)?;
    let registry = extract(doc, format, &config)?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Registry:".bold());
    println!("  Resources: {}", registry.resources().count());
    println!("  Operations: {}", registry.operations().count());
    println!("  Classes: {}", registry.classes().len());
    println!();

    for line in registry.summary() {
        if line.starts_with("|+ Resource") {
            println!("{}", line.yellow());
        } else if line.starts_with("class ") {
            println!("{}", line.cyan());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

fn generate_command(
    doc: &Path,
    format: Option<InputFormat>,
    config_path: Option<&Path>,
    output: &Path,
    runtime_crate: Option<String>,
    verbose: bool,
) -> Result<()> {
    println!("{} Generating client from: {}", "→".cyan(), doc.display());

    let mut config = load_config(config_path, verbose)?;
    if let Some(runtime_crate) = runtime_crate {
        config.runtime_crate = runtime_crate;
    }

    if verbose {
        println!("  Runtime: {}", config.runtime_crate);
        println!("  Output: {}", output.display());
    }

    println!("{} Parsing reference document...", "→".cyan());
    let registry = extract(doc, format, &config)?;
    println!(
        "{} Extracted {} operations and {} classes",
        "✓".green(),
        registry.operations().count(),
        registry.classes().len()
    );

    println!("{} Generating client source...", "→".cyan());
    let generator =
        ClientGenerator::new(&registry, &config).context("Failed to create generator")?;
    generator
        .generate_to_file(output)
        .context("Failed to generate client")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  📄 {}", output.display());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Add `mod {};` to your crate", module_name(output));
    println!(
        "  2. Depend on the runtime crate imported as `{}`",
        config.runtime_crate
    );
    println!("  3. Implement `Transport` for your HTTP client");

    Ok(())
}

fn module_name(output: &Path) -> String {
    output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "api_gen".to_string())
}
