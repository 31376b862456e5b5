use super::types::DismissState;
use crate::valuation::RawDomainRecord;

/// Keep only records whose domain is not currently dismissed.
pub fn filter_active(records: Vec<RawDomainRecord>, state: &DismissState) -> Vec<RawDomainRecord> {
    records
        .into_iter()
        .filter(|r| !state.is_dismissed(&r.domain))
        .collect()
}

/// Keep only records whose domain is currently dismissed.
pub fn filter_dismissed(
    records: Vec<RawDomainRecord>,
    state: &DismissState,
) -> Vec<RawDomainRecord> {
    records
        .into_iter()
        .filter(|r| state.is_dismissed(&r.domain))
        .collect()
}
