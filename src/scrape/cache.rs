use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default freshness window for cached listing pages.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Configuration for listing-page caching
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn new(enabled: bool, ttl: Option<Duration>) -> Self {
        Self {
            enabled,
            ttl: ttl.unwrap_or(DEFAULT_TTL),
        }
    }
}

/// Get the platform-appropriate cache directory for domain-scout
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("domain-scout/pages"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/domain-scout/pages",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the page cache directory
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Disk-persistent page cache keyed by URL.
///
/// cacache stamps each entry with its write time; an entry older than the
/// configured TTL is treated as a miss so a fresh copy gets fetched.
pub struct PageCache {
    cache_path: PathBuf,
    ttl: Duration,
}

impl PageCache {
    pub fn new(cache_path: PathBuf, ttl: Duration) -> Self {
        Self { cache_path, ttl }
    }

    /// Look up a fresh cached body for `url`. Stale and missing entries both
    /// return None; a corrupt entry is treated as missing rather than an error.
    pub fn get(&self, url: &str) -> Option<String> {
        let metadata = cacache::metadata_sync(&self.cache_path, url).ok()??;

        let age_ms = now_millis().saturating_sub(metadata.time);
        if age_ms > self.ttl.as_millis() {
            return None;
        }

        let body = cacache::read_sync(&self.cache_path, url).ok()?;
        String::from_utf8(body).ok()
    }

    /// Store a fetched page body. Cache write failures are reported to the
    /// caller but are not fatal to the scrape.
    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        cacache::write_sync(&self.cache_path, url, body.as_bytes())
            .with_context(|| format!("Failed to cache page body for {}", url))?;
        Ok(())
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
