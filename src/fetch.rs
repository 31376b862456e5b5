use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;

use crate::config::Config;
use crate::dismiss::{filter_active, filter_dismissed, DismissState};
use crate::scrape::{get_cache_path, scrape_source, CacheConfig, PageCache};
use crate::valuation::{evaluate_batch, RawDomainRecord, ScoreResult, ValuationConfig};

/// Scrape all configured sources, deduplicate, drop excluded and dismissed
/// domains, score everything, and split into active and dismissed lists.
/// Both lists come back sorted by total score descending (stable on ties).
///
/// Called from main for the list/export/open paths.
pub async fn fetch_and_score_domains(
    client: &reqwest::Client,
    config: &Config,
    valuation: &ValuationConfig,
    dismiss_state: &DismissState,
    cache_config: &CacheConfig,
    verbose: bool,
) -> Result<(Vec<ScoreResult>, Vec<ScoreResult>)> {
    if verbose {
        let cache_status = if cache_config.enabled {
            "enabled"
        } else {
            "disabled (--no-cache)"
        };
        eprintln!("Cache: {}", cache_status);
    }

    let cache = if cache_config.enabled {
        Some(PageCache::new(get_cache_path(), cache_config.ttl))
    } else {
        None
    };

    // Scrape every source in parallel
    let mut all_records = Vec::new();
    let mut any_succeeded = false;

    let mut futures = FuturesUnordered::new();
    for source in &config.sources {
        let cache = cache.as_ref();
        futures.push(async move {
            let result = scrape_source(client, source, cache).await;
            (source.name.as_deref().unwrap_or(&source.url), result)
        });
    }

    while let Some((name, result)) = futures.next().await {
        match result {
            Ok(records) => {
                if verbose {
                    eprintln!("  Found {} domains from {}", records.len(), name);
                }
                all_records.extend(records);
                any_succeeded = true;
            }
            Err(e) => {
                eprintln!("Source failed: {} - {}", name, e);
            }
        }
    }

    // If all sources failed, return error
    if !any_succeeded && !config.sources.is_empty() {
        anyhow::bail!("All sources failed. Check your network connection and session cookie.");
    }

    // Deduplicate by domain (the same domain may appear in multiple listings)
    let mut seen = HashSet::new();
    let unique_records: Vec<_> = all_records
        .into_iter()
        .filter(|r| seen.insert(r.domain.clone()))
        .collect();

    if verbose {
        eprintln!("After deduplication: {} unique domains", unique_records.len());
    }

    let kept_records = apply_excludes(unique_records, config.exclude.as_deref());

    // Split into active and dismissed
    let active = filter_active(kept_records.clone(), dismiss_state);
    let dismissed = filter_dismissed(kept_records, dismiss_state);

    if verbose {
        eprintln!(
            "After filter: {} active, {} dismissed",
            active.len(),
            dismissed.len()
        );
    }

    let (active_scored, skipped) = evaluate_batch(&active, valuation);
    for message in &skipped {
        eprintln!("Warning: skipped record: {}", message);
    }

    let (dismissed_scored, skipped) = evaluate_batch(&dismissed, valuation);
    for message in &skipped {
        eprintln!("Warning: skipped record: {}", message);
    }

    Ok((active_scored, dismissed_scored))
}

/// Drop records whose domain matches any configured glob pattern.
/// Unparseable patterns are reported once and ignored.
fn apply_excludes(
    records: Vec<RawDomainRecord>,
    patterns: Option<&[String]>,
) -> Vec<RawDomainRecord> {
    let Some(patterns) = patterns else {
        return records;
    };

    let mut compiled = Vec::new();
    for raw in patterns {
        match glob::Pattern::new(raw) {
            Ok(pattern) => compiled.push(pattern),
            Err(e) => eprintln!("Warning: ignoring exclude pattern '{}': {}", raw, e),
        }
    }

    records
        .into_iter()
        .filter(|r| !compiled.iter().any(|p| p.matches(&r.domain)))
        .collect()
}
