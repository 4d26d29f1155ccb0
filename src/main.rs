use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod batch;
mod cli;
mod config;
mod metadata;
mod scrape;
mod web;
use config::Config;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for scrape output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = cli::Args::parse();

    let base_path = Config::base_path()?;
    let mut config = Config::load_with(&base_path)
        .with_context(|| format!("failed to load config from {base_path}"))?;

    match args.command {
        cli::Command::Daemon { listen } => {
            if let Some(listen) = listen {
                config.listen = listen;
                config.validate()?;
            }
            web::start_daemon(config)
        }

        cli::Command::Scrape { urls, raw, workers } => {
            if let Some(workers) = workers {
                config.scrape.workers = workers;
                config.validate()?;
            }

            let out = if raw {
                serde_json::to_string_pretty(&batch::run_raw(Some(urls), &config.scrape)?)?
            } else {
                serde_json::to_string_pretty(&batch::run(Some(urls), &config.scrape)?)?
            };
            println!("{out}");
            Ok(())
        }
    }
}
