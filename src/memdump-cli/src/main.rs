mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::{CompareArgs, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    match cli.command {
        Commands::Compare {
            files,
            memory_size,
            flush_trailing,
            headers,
        } => {
            let config = Config::load_from(&config_path)?;
            let compare = config.compare_config(CompareArgs {
                files,
                memory_size,
                flush_trailing,
                headers,
            })?;
            commands::compare::handle(&compare)?;
        }

        Commands::Concat { paths } => {
            commands::concat::handle(&paths)?;
        }

        Commands::Configure {
            inputs,
            memory_size,
            flush_trailing,
            headers,
            show,
        } => {
            commands::configure::handle(
                &config_path,
                commands::configure::Changes {
                    inputs,
                    memory_size,
                    flush_trailing,
                    headers,
                },
                show,
            )?;
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries the reports
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "memdump=warn",
        1 => "memdump=info",
        _ => "memdump=debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
