use super::config::ValuationConfig;
use super::record::RawDomainRecord;

// Scoring policy: length, SEO and technical factors use tiered thresholds
// where only the highest applicable tier counts; keyword and commercial
// factors are cumulative per match (overlapping matches all count).
// The asymmetry is deliberate and must stay.

const MAX_SCORE: f64 = 100.0;

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}

fn is_pure_alpha(base: &str) -> bool {
    !base.is_empty() && base.chars().all(|c| c.is_ascii_alphabetic())
}

fn vowel_ratio(base: &str) -> f64 {
    let len = base.chars().count();
    if len == 0 {
        return 0.0;
    }
    let vowels = base
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();
    vowels as f64 / len as f64
}

/// Length score: discrete tiers, shorter typeable names win.
/// 4-6 chars -> 100, 7-10 -> 80, 3 or 11-15 -> 60, 16-20 -> 40, else 20.
pub fn length_score(base: &str) -> f64 {
    match base.chars().count() {
        4..=6 => 100.0,
        7..=10 => 80.0,
        3 | 11..=15 => 60.0,
        16..=20 => 40.0,
        _ => 20.0,
    }
}

/// Keyword score: +20 per high-value keyword substring match (cumulative,
/// overlaps double-count), +10 for containing any letter, +15 for a purely
/// alphabetic name. Clamped to 100.
///
/// The base name arrives lowercased, so keyword matching lowercases the
/// configured entries too.
pub fn keyword_score(base: &str, config: &ValuationConfig) -> f64 {
    let mut score = 0.0;

    for keyword in &config.value_keywords {
        if base.contains(keyword.to_ascii_lowercase().as_str()) {
            score += 20.0;
        }
    }

    if base.chars().any(|c| c.is_ascii_alphabetic()) {
        score += 10.0;
    }
    if is_pure_alpha(base) {
        score += 15.0;
    }

    clamp(score)
}

/// Brandability: base 50, +20 for length <= 8, +15 for purely alphabetic,
/// +15 when the vowel ratio sits in the pronounceable [0.2, 0.5] band.
pub fn brandability_score(base: &str) -> f64 {
    let mut score = 50.0;

    if base.chars().count() <= 8 {
        score += 20.0;
    }
    if is_pure_alpha(base) {
        score += 15.0;
    }
    let ratio = vowel_ratio(base);
    if (0.2..=0.5).contains(&ratio) {
        score += 15.0;
    }

    clamp(score)
}

/// SEO score: age, backlink and traffic tiers (highest tier only), plus a
/// flat bonus for premium TLDs. No base score.
pub fn seo_score(record: &RawDomainRecord, tld: &str, config: &ValuationConfig) -> f64 {
    let mut score = 0.0;

    if record.age > 10 {
        score += 30.0;
    } else if record.age > 5 {
        score += 20.0;
    } else if record.age > 2 {
        score += 10.0;
    }

    if record.backlinks > 1000 {
        score += 25.0;
    } else if record.backlinks > 100 {
        score += 15.0;
    } else if record.backlinks > 10 {
        score += 10.0;
    }

    if config.premium_tlds.iter().any(|p| p.eq_ignore_ascii_case(tld)) {
        score += 25.0;
    }

    if record.traffic > 10_000 {
        score += 20.0;
    } else if record.traffic > 1_000 {
        score += 10.0;
    }

    clamp(score)
}

/// Technical score: base 50, authority tier (highest only), +20 for any
/// archive history.
pub fn technical_score(record: &RawDomainRecord) -> f64 {
    let mut score = 50.0;

    if record.domain_authority > 50 {
        score += 30.0;
    } else if record.domain_authority > 30 {
        score += 20.0;
    } else if record.domain_authority > 15 {
        score += 10.0;
    }

    if record.wayback_snapshots > 0 {
        score += 20.0;
    }

    clamp(score)
}

/// Commercial score: +25 per commercial keyword substring match, cumulative.
pub fn commercial_score(base: &str, config: &ValuationConfig) -> f64 {
    let mut score = 0.0;
    for keyword in &config.commercial_keywords {
        if base.contains(keyword.to_ascii_lowercase().as_str()) {
            score += 25.0;
        }
    }
    clamp(score)
}
