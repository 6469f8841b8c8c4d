//! Sequential batch checking and the verbose enrichment pass.
//!
//! Requests are never issued concurrently: the service rate-limits per caller,
//! so the controller walks the list in order and pauses between addresses.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::api::BreachApi;
use crate::checker::{CheckResult, Checker};
use crate::error::Result;
use crate::progress::{NoProgress, Progress};
use crate::records::BreachRecord;

/// Addresses found affected, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub breached: Vec<String>,
    pub pasted: Vec<String>,
}

impl BatchReport {
    /// Append `result.address` to each sequence it belongs in, at most once.
    pub fn record(&mut self, result: &CheckResult) {
        if result.is_breached() && !self.breached.contains(&result.address) {
            self.breached.push(result.address.clone());
        }
        if result.is_pasted() && !self.pasted.contains(&result.address) {
            self.pasted.push(result.address.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breached.is_empty() && self.pasted.is_empty()
    }
}

/// Full breach records for one affected address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressDetail {
    pub address: String,
    pub breaches: Vec<BreachRecord>,
}

pub struct BatchController<A> {
    checker: Checker<A>,
    spacing: Duration,
    include_pastes: bool,
    progress: Box<dyn Progress>,
}

impl<A: BreachApi> BatchController<A> {
    pub fn new(checker: Checker<A>) -> Self {
        Self {
            checker,
            spacing: Duration::from_millis(1500),
            include_pastes: true,
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_spacing(mut self, spacing: Duration) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_pastes(mut self, include: bool) -> Self {
        self.include_pastes = include;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn checker(&self) -> &Checker<A> {
        &self.checker
    }

    /// Check every address in order and collect the affected ones.
    ///
    /// Repeated addresses are checked once. The first unrecoverable failure
    /// aborts the batch; nothing gathered so far is returned.
    pub async fn run_batch(&mut self, addresses: &[String], verbose: bool) -> Result<BatchReport> {
        let queue = unique_in_order(addresses);
        let total = queue.len();
        let mut report = BatchReport::default();

        tracing::info!(total, verbose, pastes = self.include_pastes, "starting batch");
        self.progress.start(total);
        for (idx, address) in queue.iter().enumerate() {
            let result = self.checker.check_address(address, verbose, self.include_pastes).await?;
            tracing::debug!(
                address = %address,
                breaches = result.breaches.len(),
                pastes = result.pastes.as_ref().map_or(0, Vec::len),
                "checked"
            );
            report.record(&result);

            self.progress.advance(idx + 1, total);
            sleep(self.spacing).await;
        }
        self.progress.finish();

        tracing::info!(breached = report.breached.len(), pasted = report.pasted.len(), "batch complete");
        Ok(report)
    }

    /// Re-query the breach-affected addresses of `report` for full records.
    ///
    /// Paste-only addresses are not revisited. An address whose verbose lookup
    /// comes back empty (the service changed in between) is dropped. Lookups
    /// are spaced from each other but not followed by a pause.
    pub async fn enrich(&mut self, report: &BatchReport) -> Result<Vec<AddressDetail>> {
        let total = report.breached.len();
        let mut details = Vec::with_capacity(total);
        if total == 0 {
            return Ok(details);
        }

        tracing::info!(total, "fetching full breach details");
        self.progress.start(total);
        for (idx, address) in report.breached.iter().enumerate() {
            // The first pass already paused after its last address.
            if idx > 0 {
                sleep(self.spacing).await;
            }
            let breaches = self.checker.check_breach(address, true).await?;
            if breaches.is_empty() {
                tracing::warn!(address = %address, "no breach details on second lookup");
            } else {
                details.push(AddressDetail {
                    address: address.clone(),
                    breaches,
                });
            }

            self.progress.advance(idx + 1, total);
        }
        self.progress.finish();
        Ok(details)
    }
}

fn unique_in_order(addresses: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    addresses
        .iter()
        .map(String::as_str)
        .filter(|a| seen.insert(*a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(address: &str, breached: bool, pasted: bool) -> CheckResult {
        let rec = BreachRecord {
            name: "Adobe".into(),
            title: None,
            domain: None,
            breach_date: None,
            pwn_count: None,
            data_classes: Vec::new(),
            is_verified: None,
            extra: Default::default(),
        };
        CheckResult {
            address: address.into(),
            breaches: if breached { vec![rec] } else { Vec::new() },
            pastes: Some(if pasted {
                vec![serde_json::from_str(r#"{"Source":"Pastebin"}"#).unwrap()]
            } else {
                Vec::new()
            }),
        }
    }

    #[test]
    fn record_keeps_order_and_skips_repeats() {
        let mut report = BatchReport::default();
        report.record(&result("b@x.com", true, false));
        report.record(&result("a@x.com", true, true));
        report.record(&result("b@x.com", true, true));
        report.record(&result("c@x.com", false, false));
        assert_eq!(report.breached, ["b@x.com", "a@x.com"]);
        assert_eq!(report.pasted, ["a@x.com", "b@x.com"]);
    }

    #[test]
    fn unique_in_order_keeps_first() {
        let input: Vec<String> = ["a", "b", "a", "c", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unique_in_order(&input), ["a", "b", "c"]);
    }
}
