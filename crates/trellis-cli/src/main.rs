use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trellis_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about = "Headless UI behavior toolkit with a terminal demo")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive TUI demo
    Demo {
        /// Page definition file; a bundled demo page is used when omitted
        #[arg(short, long)]
        page: Option<PathBuf>,
    },
    /// Simulate scrolling through a page and print each activation
    Spy {
        /// Page definition file; a bundled demo page is used when omitted
        #[arg(short, long)]
        page: Option<PathBuf>,
        /// Scroll offsets to visit, in order
        #[arg(short, long, required = true, num_args = 1..)]
        scroll: Vec<i64>,
    },
    /// Classify swipe gestures by their net horizontal displacement
    Swipe {
        /// One displacement per gesture; negative means leftwards
        #[arg(short, long, required = true, num_args = 1.., allow_negative_numbers = true)]
        trace: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Some(Commands::Demo { page }) => commands::demo::run(page.as_deref(), &config),
        None => commands::demo::run(None, &config),
        Some(Commands::Spy { page, scroll }) => {
            commands::spy::run(page.as_deref(), &scroll, &config)
        }
        Some(Commands::Swipe { trace }) => commands::swipe::run(&trace),
    }
}
