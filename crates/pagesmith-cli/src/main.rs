//! pagesmith command-line interface.
//!
//! Commands: analyze, import, postprocess, lock, contract.
//! Documents and JSON go to stdout (or `--output`); logs go to stderr.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::CliConfig;
use pagesmith_lock::LockGranularity;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(about = "Compile design exports and generated markup into editable HTML documents")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: ./pagesmith.toml if present)
    #[arg(short, long, global = true, env = "PAGESMITH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a design export and print sections and tokens as JSON
    Analyze {
        /// Design export JSON (`-` for stdin)
        export: PathBuf,
    },

    /// Render a design export as an HTML document
    Import {
        /// Design export JSON (`-` for stdin)
        export: PathBuf,

        /// Document title
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize raw generated markup
    Postprocess {
        /// Raw generator output (`-` for stdin)
        raw: PathBuf,

        /// Directory of assets to inline, referenced by file name
        #[arg(long)]
        assets: Option<PathBuf>,

        /// JSON list of locked regions to put back
        #[arg(long)]
        locks: Option<PathBuf>,

        /// `lang` for documents that need a new shell
        #[arg(long)]
        lang: Option<String>,

        /// Do not synthesize the mobile navigation layer
        #[arg(long)]
        no_mobile_nav: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Toggle locks on a document and print the locked regions as JSON
    Lock {
        /// HTML document (`-` for stdin)
        document: PathBuf,

        /// Editable marker (`h2-1`) or element id to toggle; repeatable
        #[arg(short, long = "toggle", required = true)]
        toggle: Vec<String>,

        /// Lock exactly the addressed element instead of its enclosing block
        #[arg(long)]
        exact: bool,
    },

    /// Print the lock contract for a JSON list of locked regions
    Contract {
        locks: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Analyze { export } => emit(None, &commands::analyze(&export)?),
        Commands::Import { export, title, output } => {
            let html = commands::import(&export, title.as_deref(), config.title.as_deref())?;
            emit(output.as_deref(), &html)
        }
        Commands::Postprocess {
            raw,
            assets,
            locks,
            lang,
            no_mobile_nav,
            output,
        } => {
            let mut options = config.post_options();
            if let Some(lang) = lang {
                options.lang = lang;
            }
            if no_mobile_nav {
                options.mobile_nav = false;
            }
            let html = commands::postprocess(&raw, assets.as_deref(), locks.as_deref(), options)?;
            emit(output.as_deref(), &html)
        }
        Commands::Lock { document, toggle, exact } => {
            let granularity = if exact { LockGranularity::Exact } else { config.lock_granularity };
            emit(None, &commands::lock(&document, &toggle, granularity)?)
        }
        Commands::Contract { locks } => emit(None, &commands::contract_text(&locks)?),
    }
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => println!("{}", text),
    }
    Ok(())
}
