//! Yahoo Finance chart API quote provider.

pub mod client;
pub mod messages;
pub mod provider;

pub use client::ChartClient;
pub use provider::YahooQuoteProvider;
