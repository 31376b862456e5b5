pub mod browser;
pub mod config;
pub mod credentials;
pub mod dismiss;
pub mod fetch;
pub mod output;
pub mod report;
pub mod scrape;
pub mod valuation;
