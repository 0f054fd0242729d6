//! sbom-extract: package extraction for CycloneDX SBOMs
//!
//! Reads a CycloneDX XML or JSON BOM and prints its normalized package list.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sbom_extract::{
    config::{self, ExtractConfig, FilterConfig, OutputConfig, Validatable, XmlConfig},
    filter_by_type,
    reports::{create_reporter, ReportFormat},
};
use std::io::{self, Write as _};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Process exit codes
mod exit_codes {
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[derive(Parser)]
#[command(name = "sbom-extract")]
#[command(author = "Binarly.io")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
#[command(about = "Extract normalized package lists from CycloneDX SBOMs", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Packages extracted
    3  Error occurred

EXAMPLES:
    # Table of every package
    sbom-extract bom.xml

    # npm packages only, as JSON
    sbom-extract bom.json --type npm -o json > npm.json

    # Per-vendor counts
    sbom-extract bom.xml -o summary

    # Start a config file in the current directory
    sbom-extract config init")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the CycloneDX BOM (`.json` for JSON, anything else is read as XML)
    #[arg(required = true)]
    bom: Option<PathBuf>,

    /// Keep only packages of this purl type (npm, maven, pypi, ...)
    #[arg(short = 't', long = "type")]
    package_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,

    /// Only read XML licenses bound to the CycloneDX 1.5 namespace
    #[arg(long)]
    strict_namespace: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "SBOM_EXTRACT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the discovered config file
    Path,
    /// Generate an example .sbom-extract.yaml in the current directory
    Init,
}

impl Cli {
    /// Settings given on the command line, layered over the file config.
    fn overrides(&self) -> ExtractConfig {
        ExtractConfig {
            filter: FilterConfig {
                package_type: self.package_type.clone(),
            },
            output: OutputConfig {
                format: self.output,
                pretty: !self.compact,
                file: self.output_file.clone(),
            },
            xml: XmlConfig {
                strict_namespace: self.strict_namespace,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let result = match &cli.command {
        Some(command) => run_command(command, &cli),
        None => run(&cli),
    };
    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run_command(command: &Commands, cli: &Cli) -> Result<()> {
    match command {
        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                match &loaded_from {
                    Some(path) => eprintln!("# Loaded from: {}", path.display()),
                    None => eprintln!("# No config file found; showing defaults"),
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
            }
            ConfigAction::Path => match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => println!("{}", path.display()),
                None => eprintln!("No config file found."),
            },
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".sbom-extract.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
            }
        },
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let Some(bom) = cli.bom.as_deref() else {
        anyhow::bail!("no BOM file given");
    };
    let (config, loaded_from) =
        ExtractConfig::from_file_with_overrides(cli.config.as_deref(), &cli.overrides());
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", details.join("\n  "));
    }

    let packages = config
        .dispatcher()
        .try_extract(bom)
        .with_context(|| format!("failed to extract packages from {}", bom.display()))?;
    tracing::debug!("Extracted {} packages", packages.len());

    let packages = match config.filter.package_type.as_deref() {
        Some(package_type) => filter_by_type(&packages, package_type),
        None => packages,
    };

    let reporter = create_reporter(&config.output);
    match &config.output.file {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            reporter.write_to(&packages, &mut file)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            reporter.write_to(&packages, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
