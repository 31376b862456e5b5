use serde::{Deserialize, Serialize};

use crate::valuation::ValuationConfig;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Listing pages to scrape, in order
    pub sources: Vec<SourceConfig>,

    /// Valuation overrides; defaults apply when absent
    #[serde(default)]
    pub valuation: Option<ValuationConfig>,

    /// Glob patterns for domains to drop before scoring, e.g. ["*.xyz"]
    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    /// Page cache freshness window in humantime format, e.g. "15m", "1h"
    #[serde(default)]
    pub cache_ttl: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: Option<String>,
    pub url: String,
}
