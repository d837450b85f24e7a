pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod listing;
pub mod report;
pub mod storage;
