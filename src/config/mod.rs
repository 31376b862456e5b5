mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, SourceConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Get the config directory path (~/.config/domain-scout/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("domain-scout")
}

/// Get the default config file path (~/.config/domain-scout/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path
///   (~/.config/domain-scout/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `domain-scout init` to create one.",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Parse the optional cache_ttl config entry ("15m", "1h", ...).
pub fn parse_cache_ttl(config: &Config) -> Result<Option<Duration>> {
    match &config.cache_ttl {
        None => Ok(None),
        Some(raw) => {
            let ttl = humantime::parse_duration(raw)
                .with_context(|| format!("Invalid cache_ttl '{}'", raw))?;
            Ok(Some(ttl))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_ttl(ttl: Option<&str>) -> Config {
        Config {
            sources: vec![],
            valuation: None,
            exclude: None,
            cache_ttl: ttl.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_parse_cache_ttl_absent() {
        assert!(parse_cache_ttl(&config_with_ttl(None)).unwrap().is_none());
    }

    #[test]
    fn test_parse_cache_ttl_humantime() {
        let ttl = parse_cache_ttl(&config_with_ttl(Some("15m"))).unwrap();
        assert_eq!(ttl, Some(Duration::from_secs(900)));
    }

    #[test]
    fn test_parse_cache_ttl_invalid() {
        let err = parse_cache_ttl(&config_with_ttl(Some("soonish"))).unwrap_err();
        assert!(err.to_string().contains("soonish"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let missing = std::env::temp_dir().join("domain_scout_no_such_config.yaml");
        let _ = std::fs::remove_file(&missing);
        let err = load_config(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("init"));
    }
}
