use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable for providing a session cookie without the stored file
pub const ENV_SESSION_VAR: &str = "DOMAIN_SCOUT_SESSION";

/// Stored session credentials for the listing site.
///
/// Listing sites only show the interesting columns (backlinks, authority,
/// traffic) to logged-in users, so scraping needs a session cookie copied
/// from a browser.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    cookie: String,
}

/// Get the session file path (~/.config/domain-scout/session.json)
pub fn get_session_path() -> PathBuf {
    crate::config::get_config_dir().join("session.json")
}

/// Check for a session cookie in the DOMAIN_SCOUT_SESSION environment variable.
/// Returns Some(cookie) if the env var is set and non-empty, None otherwise.
pub fn get_session_from_env() -> Option<String> {
    match std::env::var(ENV_SESSION_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Load the stored session cookie, if any.
pub fn load_session(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open session file at {}", path.display()))?;
    let session: SessionFile =
        serde_json::from_reader(file).context("Failed to parse session file")?;

    if session.version != 1 {
        anyhow::bail!("Unsupported session file version: {}", session.version);
    }

    Ok(Some(session.cookie))
}

/// Store the session cookie atomically.
pub fn store_session(path: &Path, cookie: &str) -> Result<()> {
    crate::config::ensure_config_dir()?;

    let session = SessionFile {
        version: 1,
        cookie: cookie.to_string(),
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, &session).context("Failed to serialize session")?;
    file.commit().context("Failed to save session file")?;

    Ok(())
}

/// Prompt the user to paste their session cookie. Read without echo.
pub fn prompt_for_session() -> Result<String> {
    println!("Listing site session cookie required.");
    println!("Log in with your browser, then copy the Cookie header value");
    println!("from any listing request (dev tools, Network tab).");
    println!();

    let cookie = rpassword::prompt_password("Paste cookie: ")
        .context("Failed to read cookie from stdin")?;

    let cookie = cookie.trim();
    if cookie.is_empty() {
        anyhow::bail!("Session cookie cannot be empty");
    }

    Ok(cookie.to_string())
}

/// Resolve the session cookie: env var first, then the stored file, then an
/// interactive prompt on first run (stored for next time).
pub fn setup_session_if_missing() -> Result<String> {
    if let Some(cookie) = get_session_from_env() {
        return Ok(cookie);
    }

    let path = get_session_path();
    if let Some(cookie) = load_session(&path)? {
        return Ok(cookie);
    }

    let cookie = prompt_for_session()?;
    store_session(&path, &cookie).context("Failed to store session cookie")?;
    println!("Session stored in {}", path.display());

    Ok(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_none() {
        let temp_path = env::temp_dir().join("domain_scout_session_missing.json");
        let _ = std::fs::remove_file(&temp_path);
        assert!(load_session(&temp_path).unwrap().is_none());
    }

    #[test]
    fn test_store_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("domain_scout_session_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        store_session(&temp_path, "session=abc123; uid=42").unwrap();
        let loaded = load_session(&temp_path).unwrap();
        assert_eq!(loaded.as_deref(), Some("session=abc123; uid=42"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("domain_scout_session_badver.json");
        std::fs::write(&temp_path, r#"{"version": 9, "cookie": "x"}"#).unwrap();

        let err = load_session(&temp_path).unwrap_err();
        assert!(err.to_string().contains("version"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
