//! Uptimey binary entry point

use clap::Parser;
use color_eyre::eyre::Result;
use uptimey::{cli::Args, cli::Command, commands, config::Config};

/// CLI commands log to stderr; the dashboard sets up its own file logging
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    match args.command.clone().unwrap_or(Command::Tui) {
        Command::Tui => {
            #[cfg(feature = "tui")]
            {
                let config = load_config(&args)?;
                uptimey::tui::run(config).await?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI feature not enabled");
                eprintln!("Rebuild with: cargo build --features tui");
                std::process::exit(1);
            }
        }

        Command::Snapshot { json } => {
            init_logging();
            let config = load_config(&args)?;
            commands::snapshot(&config, json).await?;
        }

        Command::Share => {
            init_logging();
            let config = load_config(&args)?;
            commands::share(&config).await?;
        }

        Command::Clear => {
            init_logging();
            let config = load_config(&args)?;
            commands::clear(&config).await?;
        }

        Command::Validate => {
            init_logging();
            let config = load_config(&args)?;
            config.print_summary();
        }
    }

    Ok(())
}
