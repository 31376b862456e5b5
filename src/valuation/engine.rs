use anyhow::Result;
use serde::Serialize;

use super::config::ValuationConfig;
use super::factors;
use super::record::RawDomainRecord;

/// The six factor scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScores {
    pub length: f64,
    pub keyword: f64,
    pub brandability: f64,
    pub seo: f64,
    pub technical: f64,
    pub commercial: f64,
}

/// Recommendation tier, derived from total_score thresholds top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StronglyRecommended,
    Recommended,
    Consider,
    Caution,
    NotRecommended,
}

impl Recommendation {
    pub fn from_total(total_score: f64) -> Self {
        if total_score >= 80.0 {
            Recommendation::StronglyRecommended
        } else if total_score >= 65.0 {
            Recommendation::Recommended
        } else if total_score >= 50.0 {
            Recommendation::Consider
        } else if total_score >= 35.0 {
            Recommendation::Caution
        } else {
            Recommendation::NotRecommended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StronglyRecommended => "strongly recommended (high value)",
            Recommendation::Recommended => "recommended (promising)",
            Recommendation::Consider => "consider (medium value)",
            Recommendation::Caution => "caution (low value)",
            Recommendation::NotRecommended => "not recommended (very low value)",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable valuation verdict for one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub domain: String,
    pub factor_scores: FactorScores,
    pub total_score: f64,
    pub recommendation: Recommendation,
    pub explanation: Vec<String>,
    pub estimated_value: String,
}

/// Score one raw record. Pure and deterministic: no IO, no shared state.
///
/// The only error is a domain name without a TLD separator; callers should
/// skip that record and keep processing the batch.
pub fn evaluate(record: &RawDomainRecord, config: &ValuationConfig) -> Result<ScoreResult> {
    let base = record.base_name()?.to_ascii_lowercase();
    let tld = record.tld()?.to_ascii_lowercase();

    let scores = FactorScores {
        length: factors::length_score(&base),
        keyword: factors::keyword_score(&base, config),
        brandability: factors::brandability_score(&base),
        seo: factors::seo_score(record, &tld, config),
        technical: factors::technical_score(record),
        commercial: factors::commercial_score(&base, config),
    };

    let w = &config.weights;
    let weighted = scores.length * w.length
        + scores.keyword * w.keyword
        + scores.brandability * w.brandability
        + scores.seo * w.seo
        + scores.technical * w.technical
        + scores.commercial * w.commercial;
    let total_score = round2(weighted);

    Ok(ScoreResult {
        domain: record.domain.clone(),
        recommendation: Recommendation::from_total(total_score),
        explanation: build_explanation(&scores),
        estimated_value: estimate_value(total_score, &tld, record.age, config),
        factor_scores: scores,
        total_score,
    })
}

/// Score a batch in ingestion order, skipping malformed records, then sort
/// descending by total score. The sort is stable so ties keep their
/// ingestion order.
///
/// Returns the results plus one message per skipped record.
pub fn evaluate_batch(
    records: &[RawDomainRecord],
    config: &ValuationConfig,
) -> (Vec<ScoreResult>, Vec<String>) {
    let mut results = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for record in records {
        match evaluate(record, config) {
            Ok(result) => results.push(result),
            Err(e) => skipped.push(e.to_string()),
        }
    }

    results.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    (results, skipped)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed check order: length, keyword, brandability, seo, technical.
/// Each annotation is gated by its own threshold, evaluated independently.
fn build_explanation(scores: &FactorScores) -> Vec<String> {
    let mut notes = Vec::new();

    if scores.length >= 80.0 {
        notes.push("Short, easily typed name".to_string());
    } else if scores.length < 50.0 {
        notes.push("Name is long or awkward to type".to_string());
    }

    if scores.keyword >= 60.0 {
        notes.push("Contains high-value keywords".to_string());
    }

    if scores.brandability >= 70.0 {
        notes.push("Strong brandability".to_string());
    }

    if scores.seo >= 60.0 {
        notes.push("Solid SEO history (age, backlinks, TLD)".to_string());
    } else if scores.seo < 40.0 {
        notes.push("Weak SEO signals".to_string());
    }

    if scores.technical >= 70.0 {
        notes.push("Good authority and archive history".to_string());
    }

    notes
}

/// Dollar-range display string: total_score x 50, then TLD and age
/// multipliers, banded by the final figure.
fn estimate_value(total_score: f64, tld: &str, age: u32, config: &ValuationConfig) -> String {
    let base_value = total_score * 50.0;
    let adjusted = base_value * config.tld_multiplier(tld) * config.age_multiplier(age);
    let value = adjusted as i64;

    if adjusted >= 5_000.0 {
        format!("${}+ (high value)", thousands(value))
    } else if adjusted >= 1_000.0 {
        format!("${}+ (medium-high value)", thousands(value))
    } else if adjusted >= 300.0 {
        format!("${}+ (medium value)", thousands(value))
    } else {
        format!("$100-{} (base value)", value)
    }
}

/// Insert commas every three digits: 12345 -> "12,345".
fn thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ValuationConfig {
        ValuationConfig::default()
    }

    fn record(domain: &str) -> RawDomainRecord {
        RawDomainRecord::new(domain)
    }

    #[test]
    fn test_techai_scenario() {
        let mut rec = record("techai.com");
        rec.age = 12;
        rec.backlinks = 1_500;
        rec.domain_authority = 60;
        rec.traffic = 12_000;
        rec.wayback_snapshots = 20;

        let result = evaluate(&rec, &config()).unwrap();
        assert_eq!(result.factor_scores.length, 100.0); // "techai", 6 chars
        assert_eq!(result.factor_scores.keyword, 65.0); // tech + ai + bonuses
        assert_eq!(result.factor_scores.seo, 100.0); // 30+25+25+20
        assert_eq!(result.factor_scores.technical, 100.0); // 50+30+20
        assert!(result.total_score >= 85.0);
        assert_eq!(result.recommendation, Recommendation::StronglyRecommended);
    }

    #[test]
    fn test_single_char_worthless_domain() {
        let result = evaluate(&record("x.com"), &config()).unwrap();
        assert_eq!(result.factor_scores.length, 20.0);
        assert_eq!(result.factor_scores.commercial, 0.0);
        // keyword: no matches, +10 letter, +15 pure alpha
        assert_eq!(result.factor_scores.keyword, 25.0);
        // base scores alone land at 38.75, the bottom of the caution band
        assert_eq!(result.total_score, 38.75);
        assert_eq!(result.recommendation, Recommendation::Caution);
    }

    #[test]
    fn test_weighted_sum_identity() {
        let mut rec = record("cloudmarket.io");
        rec.age = 7;
        rec.backlinks = 250;
        rec.domain_authority = 40;

        let cfg = config();
        let result = evaluate(&rec, &cfg).unwrap();

        let s = &result.factor_scores;
        let w = &cfg.weights;
        let expected = s.length * w.length
            + s.keyword * w.keyword
            + s.brandability * w.brandability
            + s.seo * w.seo
            + s.technical * w.technical
            + s.commercial * w.commercial;
        assert_eq!(result.total_score, (expected * 100.0).round() / 100.0);
    }

    #[test]
    fn test_determinism() {
        let mut rec = record("cryptopay.ai");
        rec.age = 4;
        rec.backlinks = 55;
        let cfg = config();
        assert_eq!(evaluate(&rec, &cfg).unwrap(), evaluate(&rec, &cfg).unwrap());
    }

    #[test]
    fn test_case_insensitive_matching() {
        let cfg = config();
        let upper = evaluate(&record("TechAI.COM"), &cfg).unwrap();
        let lower = evaluate(&record("techai.com"), &cfg).unwrap();
        assert_eq!(upper.factor_scores, lower.factor_scores);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(
            Recommendation::from_total(80.0),
            Recommendation::StronglyRecommended
        );
        assert_eq!(Recommendation::from_total(79.99), Recommendation::Recommended);
        assert_eq!(Recommendation::from_total(65.0), Recommendation::Recommended);
        assert_eq!(Recommendation::from_total(64.99), Recommendation::Consider);
        assert_eq!(Recommendation::from_total(50.0), Recommendation::Consider);
        assert_eq!(Recommendation::from_total(35.0), Recommendation::Caution);
        assert_eq!(
            Recommendation::from_total(34.99),
            Recommendation::NotRecommended
        );
    }

    #[test]
    fn test_total_score_stays_in_range() {
        let cfg = config();
        let domains = ["x.com", "techai.com", "shopstorebuysellmarket.xyz", "a.b"];
        for domain in domains {
            let result = evaluate(&record(domain), &cfg).unwrap();
            assert!((0.0..=100.0).contains(&result.total_score));
        }
    }

    #[test]
    fn test_explanation_order_and_gating() {
        let mut rec = record("techai.com");
        rec.age = 12;
        rec.backlinks = 1_500;
        rec.domain_authority = 60;
        rec.traffic = 12_000;
        rec.wayback_snapshots = 20;

        let result = evaluate(&rec, &config()).unwrap();
        // length 100, keyword 65, brandability 100, seo 100, technical 100:
        // all five positive notes fire, in the fixed order
        assert_eq!(
            result.explanation,
            vec![
                "Short, easily typed name",
                "Contains high-value keywords",
                "Strong brandability",
                "Solid SEO history (age, backlinks, TLD)",
                "Good authority and archive history",
            ]
        );
    }

    #[test]
    fn test_explanation_negative_notes() {
        let result = evaluate(&record("x.com"), &config()).unwrap();
        assert!(result
            .explanation
            .contains(&"Name is long or awkward to type".to_string()));
        assert!(result
            .explanation
            .contains(&"Weak SEO signals".to_string()));
    }

    #[test]
    fn test_explanation_middle_band_fires_neither_length_note() {
        // length between 50 and 80 produces no length note either way
        let scores = FactorScores {
            length: 60.0,
            keyword: 0.0,
            brandability: 0.0,
            seo: 50.0,
            technical: 0.0,
            commercial: 0.0,
        };
        let notes = build_explanation(&scores);
        assert!(!notes.iter().any(|n| n.contains("typed name")));
        assert!(!notes.iter().any(|n| n.contains("awkward")));
    }

    #[test]
    fn test_value_bands() {
        let cfg = config();
        // 90 x 50 x 1.5 (.com) x 1.3 (age 12) = 8775
        assert_eq!(
            estimate_value(90.0, "com", 12, &cfg),
            "$8,775+ (high value)"
        );
        // 40 x 50 x 1.0 x 1.0 = 2000
        assert_eq!(
            estimate_value(40.0, "xyz", 0, &cfg),
            "$2,000+ (medium-high value)"
        );
        // 10 x 50 x 1.0 x 1.0 = 500
        assert_eq!(estimate_value(10.0, "xyz", 0, &cfg), "$500+ (medium value)");
        // 4 x 50 = 200
        assert_eq!(estimate_value(4.0, "xyz", 0, &cfg), "$100-200 (base value)");
    }

    #[test]
    fn test_value_multipliers_stack() {
        let cfg = config();
        // 50 x 50 = 2500; io -> x1.3 = 3250; age 7 -> x1.1 = 3575
        assert_eq!(
            estimate_value(50.0, "io", 7, &cfg),
            "$3,575+ (medium-high value)"
        );
    }

    #[test]
    fn test_thousands_formatting() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(12_345), "12,345");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_batch_skips_malformed_and_keeps_valid() {
        let records = vec![record("good.com"), record("nodottld"), record("also.io")];
        let (results, skipped) = evaluate_batch(&records, &config());
        assert_eq!(results.len(), 2);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].contains("nodottld"));
    }

    #[test]
    fn test_batch_sorted_descending() {
        let mut strong = record("techai.com");
        strong.age = 12;
        strong.backlinks = 1_500;
        strong.domain_authority = 60;
        strong.traffic = 12_000;
        strong.wayback_snapshots = 20;

        let records = vec![record("x.com"), strong];
        let (results, _) = evaluate_batch(&records, &config());
        assert_eq!(results[0].domain, "techai.com");
        assert_eq!(results[1].domain, "x.com");
    }

    #[test]
    fn test_batch_sort_is_stable_on_ties() {
        // Identical attributes score identically; ingestion order must hold
        let records = vec![record("zebra.com"), record("acorn.com")];
        let (results, _) = evaluate_batch(&records, &config());
        assert_eq!(results[0].total_score, results[1].total_score);
        assert_eq!(results[0].domain, "zebra.com");
        assert_eq!(results[1].domain, "acorn.com");
    }

    #[test]
    fn test_score_result_serializes() {
        let result = evaluate(&record("techai.com"), &config()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["domain"], "techai.com");
        assert!(json["factor_scores"]["keyword"].is_number());
        assert!(json["recommendation"].is_string());
    }
}
