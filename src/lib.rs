pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod records;

pub use client::{IexClient, MarketSeries, Product};
pub use config::ClientConfig;
pub use error::{AppError, Result};
pub use fetch::{EventStream, ParamValue, QueryParams};
pub use records::{Normalized, Record, Series, Table};
