mod cli;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;

use cli::{Cli, Commands, OutputArgs, StreamKind};
use iex_cli::client::{ALL_PRODUCTS, COMMODITIES, ECONOMIC_DATA};
use iex_cli::config::{load_client_config, validate_client_config, ClientConfig};
use iex_cli::records::render;
use iex_cli::{IexClient, MarketSeries, Normalized, Product, QueryParams};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Product {
            ref name,
            ref symbol,
            ref params,
            ref output,
        } => {
            let product =
                Product::from_name(name).ok_or_else(|| anyhow!("unknown product `{name}`"))?;
            let params = parse_params(params)?;
            let client = IexClient::new(Some(symbol.as_str()), &config)?;
            let result = client
                .product(product, &params)
                .with_context(|| format!("Failed to fetch {} for {}", product.name(), symbol))?;
            let stem = format!("{}_{}", client.symbol().unwrap_or(symbol), product.name());
            emit(&result, output, &stem)?;
        }
        Commands::Base { ref symbol } => {
            let client = IexClient::new(Some(symbol.as_str()), &config)?;
            for (name, result) in client.base()? {
                println!("== {name}");
                println!("{}", render::render(&result));
            }
        }
        Commands::Market {
            ref label,
            brent,
            tenor,
            term,
        } => {
            let series = market_series(label, brent, tenor, term)?;
            let client = IexClient::new(None, &config)?;
            let value = client.market_series(series)?;
            println!("{}", render::render(&Normalized::Raw(value)));
        }
        Commands::Commodities { ref output } => {
            let client = IexClient::new(None, &config)?;
            emit(&Normalized::from(client.commodities()?), output, "commodities")?;
        }
        Commands::Economic { ref output } => {
            let client = IexClient::new(None, &config)?;
            emit(&Normalized::from(client.economic_data()?), output, "economic_data")?;
        }
        Commands::Stream {
            kind,
            ref symbol,
            limit,
        } => {
            let client = IexClient::new(Some(symbol.as_str()), &config)?;
            let events = match kind {
                StreamKind::Quotes => client.quote_stream()?,
                StreamKind::News => client.news_stream()?,
            };
            for event in events.take(limit.unwrap_or(usize::MAX)) {
                println!("{}", event?);
            }
        }
        Commands::List => list_catalog(),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => load_client_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ClientConfig::builtin(),
    };

    if let Some(token) = &cli.token {
        config = config.with_token(token.clone());
    }

    validate_client_config(&config)?;
    Ok(config)
}

fn parse_params(pairs: &[String]) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    for pair in pairs {
        let (key, value) = QueryParams::parse_pair(pair)?;
        params.set(key, value);
    }
    Ok(params)
}

fn market_series(
    label: &str,
    brent: bool,
    tenor: Option<u32>,
    term: Option<u32>,
) -> Result<MarketSeries> {
    let series = MarketSeries::from_label(label)
        .ok_or_else(|| anyhow!("unknown market series `{label}`"))?;

    Ok(match series {
        MarketSeries::Oil { .. } => MarketSeries::Oil { brent },
        MarketSeries::TreasuryRate { tenor: default } => MarketSeries::TreasuryRate {
            tenor: tenor.unwrap_or(default),
        },
        MarketSeries::MortgageRate { term: default } => MarketSeries::MortgageRate {
            term: term.unwrap_or(default),
        },
        other => other,
    })
}

fn emit(result: &Normalized, output: &OutputArgs, stem: &str) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let Some(target) = &output.csv else {
        println!("{}", render::render(result));
        return Ok(());
    };

    let table = result
        .to_table()
        .ok_or_else(|| anyhow!("this result has no tabular form; use --json instead"))?;
    let path = target.clone().unwrap_or_else(|| default_csv_path(stem));
    table.save_csv(&path)?;
    info!("wrote {} rows to {}", table.len(), path.display());
    println!("Data saved to {}", path.display());
    Ok(())
}

fn default_csv_path(stem: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y_%m_%d_%H_%M");
    PathBuf::from(format!("{stem}_{timestamp}.csv"))
}

fn list_catalog() {
    println!("Products:");
    for product in ALL_PRODUCTS {
        let marker = if product.accepts_params() { " (params)" } else { "" };
        println!("  {}{}", product.name(), marker);
    }

    println!("Market series:");
    for series in COMMODITIES.iter().chain(ECONOMIC_DATA) {
        println!("  {:<32} {}", series.label(), series.code());
    }
}
