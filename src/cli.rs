use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "iex-cli")]
#[command(about = "Fetch and normalize market data from IEX Cloud")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON client config; defaults to the builtin endpoints
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API token, overriding the config file and IEX_TOKEN
    #[arg(short, long)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one product for a symbol
    Product {
        /// Product name (see `list`)
        name: String,

        #[arg(short, long)]
        symbol: String,

        /// Extra provider parameter, repeatable (e.g. -p range=1m)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch every base product for a symbol
    Base {
        #[arg(short, long)]
        symbol: String,
    },

    /// Fetch a single market series by label
    Market {
        /// Series label (see `list`)
        label: String,

        /// Brent instead of WTI for `oil`
        #[arg(long)]
        brent: bool,

        /// Tenor in years for `daily_treasury_rates`
        #[arg(long)]
        tenor: Option<u32>,

        /// Term in years for `mortgage_rates`
        #[arg(long)]
        term: Option<u32>,
    },

    /// Latest value of every commodity series
    Commodities {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Latest value of every economic series
    Economic {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print raw streaming events
    Stream {
        #[arg(value_enum)]
        kind: StreamKind,

        #[arg(short, long)]
        symbol: String,

        /// Stop after this many events
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List products and market series
    List,
}

#[derive(clap::Args)]
pub struct OutputArgs {
    /// Write CSV instead of printing; without a path a timestamped file is created
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,

    /// Print JSON instead of a text table
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StreamKind {
    Quotes,
    News,
}
