use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Domains the user has marked "not interested", keyed by domain name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissState {
    pub version: u32,
    #[serde(default)]
    pub dismissed: HashMap<String, DismissEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissEntry {
    pub dismissed_at: DateTime<Utc>,
    pub dismissed_until: Option<DateTime<Utc>>,
}

impl DismissEntry {
    /// Format the remaining time until the dismissal expires.
    /// Returns "indefinite" for open-ended entries, "{N}h left" style otherwise.
    pub fn format_remaining(&self) -> String {
        match self.dismissed_until {
            None => "indefinite".to_string(),
            Some(until) => {
                let now = Utc::now();
                if until <= now {
                    "expired".to_string()
                } else {
                    let duration = until - now;
                    let hours = duration.num_hours();
                    let days = duration.num_days();
                    let weeks = days / 7;

                    if weeks >= 1 {
                        format!("{}w left", weeks)
                    } else if days >= 1 {
                        format!("{}d left", days)
                    } else if hours >= 1 {
                        format!("{}h left", hours)
                    } else {
                        let minutes = duration.num_minutes();
                        if minutes >= 1 {
                            format!("{}m left", minutes)
                        } else {
                            "<1m left".to_string()
                        }
                    }
                }
            }
        }
    }
}

impl Default for DismissState {
    fn default() -> Self {
        Self::new()
    }
}

impl DismissState {
    /// Create a new empty dismiss state with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            dismissed: HashMap::new(),
        }
    }

    /// Check if a domain is currently dismissed (indefinite or not yet expired)
    pub fn is_dismissed(&self, domain: &str) -> bool {
        if let Some(entry) = self.dismissed.get(domain) {
            match entry.dismissed_until {
                None => true,
                Some(until) => Utc::now() < until,
            }
        } else {
            false
        }
    }

    /// Dismiss a domain with an optional expiry time
    pub fn dismiss(&mut self, domain: String, until: Option<DateTime<Utc>>) {
        let entry = DismissEntry {
            dismissed_at: Utc::now(),
            dismissed_until: until,
        };
        self.dismissed.insert(domain, entry);
    }

    /// Remove a domain from the dismiss list.
    /// Returns true if the domain was previously dismissed, false otherwise.
    pub fn undismiss(&mut self, domain: &str) -> bool {
        self.dismissed.remove(domain).is_some()
    }

    /// Remove expired entries
    pub fn clean_expired(&mut self) {
        let now = Utc::now();
        self.dismissed.retain(|_domain, entry| match entry.dismissed_until {
            None => true,
            Some(until) => now < until,
        });
    }

    /// All dismissed entries, for the `dismissed` listing
    pub fn entries(&self) -> &HashMap<String, DismissEntry> {
        &self.dismissed
    }
}
