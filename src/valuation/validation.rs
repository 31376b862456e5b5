use super::config::ValuationConfig;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate a (possibly user-edited) valuation configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_valuation(config: &ValuationConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let w = &config.weights;
    let named = [
        ("length", w.length),
        ("keyword", w.keyword),
        ("brandability", w.brandability),
        ("seo", w.seo),
        ("technical", w.technical),
        ("commercial", w.commercial),
    ];
    for (name, weight) in named {
        if weight < 0.0 {
            errors.push(format!("valuation.weights.{}: must be non-negative", name));
        }
    }

    let sum: f64 = named.iter().map(|(_, w)| w).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!(
            "valuation.weights: must sum to 1.0 (currently {})",
            sum
        ));
    }

    if config.value_keywords.is_empty() {
        errors.push("valuation.value_keywords: must not be empty".to_string());
    }
    if config.commercial_keywords.is_empty() {
        errors.push("valuation.commercial_keywords: must not be empty".to_string());
    }

    for (i, keyword) in config.value_keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(format!("valuation.value_keywords[{}]: empty keyword", i));
        }
    }
    for (i, keyword) in config.commercial_keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(format!(
                "valuation.commercial_keywords[{}]: empty keyword",
                i
            ));
        }
    }

    for (i, tld) in config.premium_tlds.iter().enumerate() {
        if tld.starts_with('.') {
            errors.push(format!(
                "valuation.premium_tlds[{}]: write '{}' without the leading dot",
                i,
                tld.trim_start_matches('.')
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::config::FactorWeights;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_valuation(&ValuationConfig::default()).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = ValuationConfig::default();
        config.weights.keyword = 0.5;
        let errors = validate_valuation(&config).unwrap_err();
        assert!(errors[0].contains("sum to 1.0"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = ValuationConfig::default();
        config.weights = FactorWeights {
            length: -0.1,
            keyword: 0.35,
            brandability: 0.20,
            seo: 0.20,
            technical: 0.20,
            commercial: 0.05,
        };
        let errors = validate_valuation(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("weights.length") && e.contains("non-negative")));
    }

    #[test]
    fn test_empty_keyword_list_rejected() {
        let mut config = ValuationConfig::default();
        config.value_keywords.clear();
        let errors = validate_valuation(&config).unwrap_err();
        assert!(errors[0].contains("value_keywords"));
    }

    #[test]
    fn test_premium_tld_with_dot_rejected() {
        let mut config = ValuationConfig::default();
        config.premium_tlds[0] = ".com".to_string();
        let errors = validate_valuation(&config).unwrap_err();
        assert!(errors[0].contains("without the leading dot"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ValuationConfig::default();
        config.weights.keyword = 0.5; // sum off
        config.commercial_keywords.clear(); // empty list
        let errors = validate_valuation(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
