//! Market data provider access

pub mod alpha_vantage;
pub mod transport;

pub use alpha_vantage::AlphaVantageClient;
pub use transport::{HttpTransport, MarketDataTransport, ProviderFunction, ProviderQuery};

#[cfg(test)]
pub use transport::MockMarketDataTransport;
