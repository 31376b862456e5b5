use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Raw attributes scraped for a single expiring domain.
///
/// Every numeric field defaults to 0 when the listing doesn't carry it;
/// the engine degrades to the lowest-contribution score for that factor
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDomainRecord {
    /// Fully-qualified name including TLD, e.g. "example.com"
    pub domain: String,

    /// Years since first registration (0 if unknown)
    #[serde(default)]
    pub age: u32,

    /// Known backlink count
    #[serde(default)]
    pub backlinks: u64,

    /// Authority metric on the conventional 0-100 scale
    #[serde(default)]
    pub domain_authority: i64,

    /// Estimated monthly visits
    #[serde(default)]
    pub traffic: u64,

    /// Number of archived historical captures
    #[serde(default)]
    pub wayback_snapshots: u64,
}

impl RawDomainRecord {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            age: 0,
            backlinks: 0,
            domain_authority: 0,
            traffic: 0,
            wayback_snapshots: 0,
        }
    }

    /// The label(s) before the final dot, e.g. "example" in "example.com".
    ///
    /// Errors when the domain has no dot at all; that single record is
    /// malformed input and must not take down the rest of the batch.
    pub fn base_name(&self) -> Result<&str> {
        match self.domain.rsplit_once('.') {
            Some((base, _tld)) => Ok(base),
            None => bail!(
                "Malformed domain '{}': no TLD separator ('.')",
                self.domain
            ),
        }
    }

    /// The top-level domain after the final dot, e.g. "com" in "example.com".
    /// Case normalization is left to the caller.
    pub fn tld(&self) -> Result<&str> {
        match self.domain.rsplit_once('.') {
            Some((_base, tld)) => Ok(tld),
            None => bail!(
                "Malformed domain '{}': no TLD separator ('.')",
                self.domain
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_and_tld() {
        let record = RawDomainRecord::new("example.com");
        assert_eq!(record.base_name().unwrap(), "example");
        assert_eq!(record.tld().unwrap(), "com");
    }

    #[test]
    fn test_multi_label_splits_on_last_dot() {
        let record = RawDomainRecord::new("shop.co.uk");
        assert_eq!(record.base_name().unwrap(), "shop.co");
        assert_eq!(record.tld().unwrap(), "uk");
    }

    #[test]
    fn test_missing_tld_is_an_error() {
        let record = RawDomainRecord::new("nodottld");
        let err = record.base_name().unwrap_err();
        assert!(err.to_string().contains("nodottld"));
        assert!(record.tld().is_err());
    }

    #[test]
    fn test_numeric_fields_default_to_zero() {
        let record: RawDomainRecord =
            serde_json::from_str(r#"{"domain": "example.com"}"#).unwrap();
        assert_eq!(record.age, 0);
        assert_eq!(record.backlinks, 0);
        assert_eq!(record.domain_authority, 0);
        assert_eq!(record.traffic, 0);
        assert_eq!(record.wayback_snapshots, 0);
    }
}
