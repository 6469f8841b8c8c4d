//! Single-address lookups with the service's throttling contract applied.

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::api::{BreachApi, Lookup};
use crate::classify::{classify, Classification};
use crate::error::{CheckError, Result};
use crate::records::{BreachRecord, PasteRecord, Payload};

/// Outcome of checking one address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub address: String,
    pub breaches: Vec<BreachRecord>,
    /// `None` when paste lookups were not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pastes: Option<Vec<PasteRecord>>,
}

impl CheckResult {
    pub fn is_breached(&self) -> bool {
        !self.breaches.is_empty()
    }

    pub fn is_pasted(&self) -> bool {
        self.pastes.as_ref().is_some_and(|p| !p.is_empty())
    }
}

pub struct Checker<A> {
    api: A,
    retry_margin: Duration,
    max_retries: Option<u32>,
}

impl<A: BreachApi> Checker<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            retry_margin: Duration::from_millis(100),
            max_retries: None,
        }
    }

    pub fn with_retry_margin(mut self, margin: Duration) -> Self {
        self.retry_margin = margin;
        self
    }

    /// Give up after `max` throttled retries of the same lookup. Without this
    /// a throttled lookup is retried for as long as the service asks.
    pub fn with_max_retries(mut self, max: Option<u32>) -> Self {
        self.max_retries = max;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Breach lookup for `address`. Empty when the address is not in any breach.
    pub async fn check_breach(&self, address: &str, verbose: bool) -> Result<Vec<BreachRecord>> {
        let lookup = Lookup::breach(address, verbose);
        self.lookup(&lookup)
            .await?
            .into_breaches()
            .ok_or_else(|| CheckError::PayloadMismatch { target: lookup.to_string() })
    }

    /// Paste lookup for `address`. Throttling here is tracked separately from
    /// breach lookups.
    pub async fn check_paste(&self, address: &str) -> Result<Vec<PasteRecord>> {
        let lookup = Lookup::paste(address);
        self.lookup(&lookup)
            .await?
            .into_pastes()
            .ok_or_else(|| CheckError::PayloadMismatch { target: lookup.to_string() })
    }

    /// Breach lookup, then paste lookup when `include_pastes` is set.
    pub async fn check_address(&self, address: &str, verbose: bool, include_pastes: bool) -> Result<CheckResult> {
        let breaches = self.check_breach(address, verbose).await?;
        let pastes = if include_pastes {
            Some(self.check_paste(address).await?)
        } else {
            None
        };
        Ok(CheckResult {
            address: address.to_string(),
            breaches,
            pastes,
        })
    }

    async fn lookup(&self, lookup: &Lookup) -> Result<Payload> {
        let target = lookup.to_string();
        let mut retries: u32 = 0;
        loop {
            let resp = self.api.send(lookup).await?;
            match classify(lookup.kind(), &resp, &target)? {
                Classification::Found(payload) => return Ok(payload),
                Classification::NotFound => return Ok(empty_like(lookup)),
                Classification::InvalidInput => {
                    return Err(CheckError::InvalidAddress {
                        address: lookup.address().to_string(),
                    })
                }
                Classification::ServerError(status) => return Err(CheckError::ServerFault { status, target }),
                Classification::RateLimited(signal) => {
                    if self.max_retries.is_some_and(|max| retries >= max) {
                        return Err(CheckError::RetriesExhausted {
                            target,
                            attempts: retries + 1,
                        });
                    }
                    retries += 1;
                    let wait = signal.wait.saturating_add(self.retry_margin);
                    tracing::warn!(lookup = %target, retry = retries, "too many requests, waiting {:.1}s before trying again", wait.as_secs_f64());
                    sleep(wait).await;
                }
            }
        }
    }
}

fn empty_like(lookup: &Lookup) -> Payload {
    match lookup {
        Lookup::Breach { .. } => Payload::Breaches(Vec::new()),
        Lookup::Paste { .. } => Payload::Pastes(Vec::new()),
    }
}
