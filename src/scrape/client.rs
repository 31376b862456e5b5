use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE};
use std::time::Duration;

/// Listing sites serve logged-in sessions; a desktop UA avoids the
/// reflexive bot rejection some of them apply to obvious HTTP clients.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create an HTTP client carrying the stored session cookie on every request.
pub fn create_client(session_cookie: &str) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    if !session_cookie.is_empty() {
        let value = HeaderValue::from_str(session_cookie)
            .context("Session cookie contains characters not valid in a header")?;
        headers.insert(COOKIE, value);
    }

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .cookie_store(true)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to create scrape client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_cookie() {
        assert!(create_client("session=abc123").is_ok());
    }

    #[test]
    fn test_create_client_without_cookie() {
        assert!(create_client("").is_ok());
    }

    #[test]
    fn test_invalid_cookie_rejected() {
        assert!(create_client("bad\nvalue").is_err());
    }
}
