use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::models::{ExistingFilterInfo, FilterRule};

/// Separator Gmail understands between alternatives in a `from` criterion
pub const CRITERIA_SEPARATOR: &str = " OR ";

/// Addresses not already covered by an existing filter's `from` criterion
///
/// Coverage is a plain substring test, so `a@x.com` is covered by
/// `a@x.com OR b@y.com`. Filters without a `from` criterion cover nothing.
pub fn identify_unfiltered(existing: &[ExistingFilterInfo], addresses: &[String]) -> Vec<String> {
    if existing.is_empty() {
        info!("No filters found, all addresses considered unfiltered.");
        return addresses.to_vec();
    }

    let criteria: Vec<&str> = existing.iter().filter_map(|f| f.from.as_deref()).collect();

    addresses
        .iter()
        .filter(|address| {
            let covered = criteria.iter().any(|from| from.contains(address.as_str()));
            if covered {
                debug!("{} is already covered by an existing filter", address);
            }
            !covered
        })
        .cloned()
        .collect()
}

/// Join addresses into a single `from` criterion
pub fn join_criteria<S: AsRef<str>>(addresses: &[S]) -> String {
    addresses
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CRITERIA_SEPARATOR)
}

/// Filter rule that moves matching mail to trash
///
/// Returns `None` for an empty criterion, which Gmail would reject.
pub fn build_trash_filter(
    criteria: &str,
    add_label_ids: &[String],
    remove_label_ids: &[String],
) -> Option<FilterRule> {
    if criteria.trim().is_empty() {
        return None;
    }

    Some(FilterRule {
        from_criteria: criteria.to_string(),
        add_label_ids: add_label_ids.to_vec(),
        remove_label_ids: remove_label_ids.to_vec(),
    })
}

/// How unfiltered addresses from successive pages combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccumulationPolicy {
    /// Each page replaces the previous result; only the last page counts
    #[default]
    LastPage,
    /// Every page contributes, deduplicated in first-seen order
    Merge,
}

/// Combines per-page unfiltered addresses according to a policy
#[derive(Debug, Clone, Default)]
pub struct UnfilteredAccumulator {
    policy: AccumulationPolicy,
    addresses: Vec<String>,
    seen: HashSet<String>,
    pages: usize,
}

impl UnfilteredAccumulator {
    pub fn new(policy: AccumulationPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> AccumulationPolicy {
        self.policy
    }

    /// Number of pages pushed so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn push_page(&mut self, unfiltered: Vec<String>) {
        self.pages += 1;

        match self.policy {
            AccumulationPolicy::LastPage => {
                let dropped = self
                    .addresses
                    .iter()
                    .filter(|a| !unfiltered.contains(a))
                    .count();
                if dropped > 0 {
                    warn!(
                        "Page {} replaces {} unfiltered address(es) from earlier pages \
                         (use --merge-pages to keep them)",
                        self.pages, dropped
                    );
                }
                self.addresses = unfiltered;
            }
            AccumulationPolicy::Merge => {
                for address in unfiltered {
                    if self.seen.insert(address.clone()) {
                        self.addresses.push(address);
                    }
                }
            }
        }
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn into_addresses(self) -> Vec<String> {
        self.addresses
    }
}
