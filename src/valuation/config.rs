use serde::{Deserialize, Serialize};

/// Factor weights for the weighted total. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorWeights {
    pub length: f64,
    pub keyword: f64,
    pub brandability: f64,
    pub seo: f64,
    pub technical: f64,
    pub commercial: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            length: 0.15,
            keyword: 0.25,
            brandability: 0.20,
            seo: 0.20,
            technical: 0.15,
            commercial: 0.05,
        }
    }
}

/// Valuation configuration.
///
/// Owns every table the engine consults: keyword lists, the premium TLD set,
/// and the value multipliers. The defaults are the canonical tables; any of
/// them can be overridden from the `valuation:` section of the config file.
///
/// Example YAML:
/// ```yaml
/// valuation:
///   weights:
///     length: 0.15
///     keyword: 0.25
///     brandability: 0.20
///     seo: 0.20
///     technical: 0.15
///     commercial: 0.05
///   value_keywords: [ai, crypto, tech]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValuationConfig {
    #[serde(default)]
    pub weights: FactorWeights,

    /// High-value keywords; each substring match adds 20 keyword points
    #[serde(default = "default_value_keywords")]
    pub value_keywords: Vec<String>,

    /// Commercial-intent keywords; each substring match adds 25 commercial points
    #[serde(default = "default_commercial_keywords")]
    pub commercial_keywords: Vec<String>,

    /// TLDs (without the dot) that earn the +25 SEO bonus
    #[serde(default = "default_premium_tlds")]
    pub premium_tlds: Vec<String>,
}

fn default_value_keywords() -> Vec<String> {
    [
        "ai", "app", "bet", "bit", "block", "chain", "cloud", "code", "coin",
        "crypto", "cyber", "data", "dev", "digital", "finance", "fit", "game",
        "health", "hub", "lab", "learn", "media", "meta", "net", "pay", "pro",
        "saas", "smart", "tech", "web",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_commercial_keywords() -> Vec<String> {
    [
        "shop", "store", "buy", "sell", "market", "trade", "service",
        "consulting", "solution", "platform",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_premium_tlds() -> Vec<String> {
    ["com", "net", "org", "io", "ai", "co"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            value_keywords: default_value_keywords(),
            commercial_keywords: default_commercial_keywords(),
            premium_tlds: default_premium_tlds(),
        }
    }
}

impl ValuationConfig {
    /// Dollar multiplier for a TLD (applied to the raw value estimate,
    /// independent of the premium-TLD SEO bonus).
    pub fn tld_multiplier(&self, tld: &str) -> f64 {
        match tld {
            "com" => 1.5,
            "io" | "ai" => 1.3,
            "net" | "org" => 1.2,
            _ => 1.0,
        }
    }

    /// Dollar multiplier for registration age, on top of the TLD multiplier.
    pub fn age_multiplier(&self, age: u32) -> f64 {
        if age > 10 {
            1.3
        } else if age > 5 {
            1.1
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = FactorWeights::default();
        let sum = w.length + w.keyword + w.brandability + w.seo + w.technical + w.commercial;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_tables_populated() {
        let config = ValuationConfig::default();
        assert!(config.value_keywords.iter().any(|k| k == "ai"));
        assert!(config.value_keywords.iter().any(|k| k == "crypto"));
        assert_eq!(config.commercial_keywords.len(), 10);
        assert_eq!(config.premium_tlds.len(), 6);
    }

    #[test]
    fn test_tld_multipliers() {
        let config = ValuationConfig::default();
        assert_eq!(config.tld_multiplier("com"), 1.5);
        assert_eq!(config.tld_multiplier("io"), 1.3);
        assert_eq!(config.tld_multiplier("ai"), 1.3);
        assert_eq!(config.tld_multiplier("net"), 1.2);
        assert_eq!(config.tld_multiplier("org"), 1.2);
        assert_eq!(config.tld_multiplier("xyz"), 1.0);
    }

    #[test]
    fn test_age_multipliers() {
        let config = ValuationConfig::default();
        assert_eq!(config.age_multiplier(0), 1.0);
        assert_eq!(config.age_multiplier(5), 1.0);
        assert_eq!(config.age_multiplier(6), 1.1);
        assert_eq!(config.age_multiplier(10), 1.1);
        assert_eq!(config.age_multiplier(11), 1.3);
    }

    #[test]
    fn test_valuation_config_serde_roundtrip() {
        let config = ValuationConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ValuationConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let yaml = r#"
value_keywords: [ai, vr]
"#;
        let config: ValuationConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.value_keywords, vec!["ai", "vr"]);
        assert_eq!(config.weights, FactorWeights::default());
        assert_eq!(config.commercial_keywords.len(), 10);
    }
}
