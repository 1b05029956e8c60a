use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use easel_core::config::{CanvasConfig, Config, LoggingConfig, RemoteConfig};

mod formula;
mod shell;

#[derive(Parser)]
#[command(
    name = "easel",
    about = "Shape canvas with file and remote save/restore, plus field formulas",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive drawing session (default)
    Shell {
        /// Painting file to open at start
        #[arg(long)]
        open: Option<PathBuf>,
    },

    /// Evaluate a formula over NAME=VALUE inputs
    Formula {
        /// Expression, e.g. "price * (1 + tax)"
        expression: String,

        /// Field values as NAME=VALUE
        inputs: Vec<String>,

        /// Keep reading NAME=VALUE updates and re-evaluating
        #[arg(short, long)]
        interactive: bool,
    },

    /// Render a painting file as SVG
    Render {
        /// Painting JSON file
        file: PathBuf,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Check the configuration for problems
    Validate,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool, logging: Option<&LoggingConfig>) {
    let level = if verbose {
        "debug".to_string()
    } else {
        logging
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| "info".to_string())
    };
    let mut directives = vec![level];
    if let Some(l) = logging {
        directives.extend(l.filters.iter().cloned());
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives.join(",")));

    let json = logging.is_some_and(|l| l.format == "json");
    let stdout = logging.is_some_and(|l| l.output == "stdout");

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match (json, stdout) {
        (true, true) => builder.json().with_writer(std::io::stdout).init(),
        (true, false) => builder.json().with_writer(std::io::stderr).init(),
        (false, true) => builder.with_writer(std::io::stdout).init(),
        (false, false) => builder.with_writer(std::io::stderr).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_path);

    let config = Config::load(&config_path)?;

    init_logging(cli.verbose, config.logging.as_ref());

    match cli.command.unwrap_or(Commands::Shell { open: None }) {
        Commands::Shell { open } => {
            let store = easel_remote::HttpStore::from_config(&config)?;
            tracing::info!(base_url = %store.base_url, "Starting drawing session");
            let mut shell = shell::Shell::new(&config, Arc::new(store));
            if let Some(path) = open {
                shell.run_line(&format!("import {}", path.display())).await;
            }
            shell.run().await?;
        }
        Commands::Formula {
            expression,
            inputs,
            interactive,
        } => {
            formula::run(&expression, &inputs, interactive)?;
        }
        Commands::Render { file, out } => {
            let document = easel_canvas::file::import_file(&file).await?;
            let svg = easel_canvas::render::render_document(&document);
            match out {
                Some(path) => {
                    tokio::fs::write(&path, svg).await?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{svg}"),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let json = serde_json::to_string_pretty(&config)?;
                println!("{json}");
            }
            ConfigAction::Validate => {
                let (warnings, errors) = config.validate();
                for w in &warnings {
                    println!("warning: {w}");
                }
                for e in &errors {
                    println!("error: {e}");
                }
                if errors.is_empty() {
                    println!("Config OK: {}", config_path.display());
                } else {
                    anyhow::bail!("{} config error(s)", errors.len());
                }
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    );
                }
                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let defaults = Config {
                    remote: Some(RemoteConfig::default()),
                    canvas: Some(CanvasConfig {
                        default_title: Some("Untitled".to_string()),
                        default_tool: Some("circle".to_string()),
                    }),
                    logging: Some(LoggingConfig {
                        level: Some("info".to_string()),
                        ..LoggingConfig::default()
                    }),
                };
                defaults.save(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}
