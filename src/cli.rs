use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the scrape api over http
    Daemon {
        /// Address to bind, overrides `listen` from config.yaml
        #[clap(short, long)]
        listen: Option<String>,
    },

    /// Scrape urls and print the result as json
    Scrape {
        /// Urls to scrape, in output order
        #[clap(required = true)]
        urls: Vec<String>,

        /// Print found values only, without placeholder strings
        /// like "None" or "No title found"
        #[clap(long, default_value = "false")]
        raw: bool,

        /// Number of urls fetched concurrently
        #[clap(short, long)]
        workers: Option<usize>,
    },
}
