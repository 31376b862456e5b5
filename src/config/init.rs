use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{ensure_config_dir, get_config_path, Config, SourceConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, uses the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("domain-scout configuration");
    println!("==========================");
    println!();

    let config_path = default_path.unwrap_or_else(get_config_path);
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!("{} already exists. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Keeping existing config.");
            return Ok(());
        }
    }

    println!("Add the listing pages to scrape. An empty URL finishes the list.");
    let mut sources = Vec::new();
    loop {
        let url = if sources.is_empty() {
            prompt_with_default(
                "Listing URL",
                "https://member.expireddomains.net/domains/pendingdelete/",
            )?
        } else {
            prompt("Listing URL (empty to finish): ")?
        };
        if url.is_empty() {
            break;
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            println!("  Invalid: URL must start with http:// or https://. Try again.");
            continue;
        }
        let name = prompt("Short name for this source (optional): ")?;
        sources.push(SourceConfig {
            name: if name.is_empty() { None } else { Some(name) },
            url,
        });
    }

    println!();
    let cache_ttl = loop {
        let input = prompt_with_default("Page cache TTL", "15m")?;
        match humantime::parse_duration(&input) {
            Ok(_) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let config = Config {
        sources,
        valuation: None, // defaults; edit the file to tune weights/keywords
        exclude: None,
        cache_ttl: Some(cache_ttl),
    };

    if config_path == get_config_path() {
        ensure_config_dir()?;
    } else if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize config")?;
    std::fs::write(&config_path, yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Wrote {}", config_path.display());
    println!("Edit the valuation section there to tune weights and keyword lists.");
    Ok(())
}
