use anyhow::{Context, Result};

/// WHOIS lookup URL for a domain
pub fn whois_url(domain: &str) -> String {
    format!("https://who.is/whois/{}", domain)
}

/// Open a URL in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
