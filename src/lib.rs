pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod screener;
pub mod services;
pub mod snapshot;
