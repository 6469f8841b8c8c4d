//! Maps raw service responses onto the outcomes the checker acts on.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;

use crate::api::{LookupKind, RawResponse};
use crate::error::{CheckError, Result};
use crate::records::{BreachRecord, PasteRecord, Payload};

/// Used when a 429 arrives without a usable `Retry-After`.
pub const FALLBACK_RETRY_AFTER: Duration = Duration::from_secs(2);

/// Server-directed wait extracted from a throttled response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitSignal {
    pub wait: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// May hold an empty payload; callers treat that like `NotFound`.
    Found(Payload),
    NotFound,
    InvalidInput,
    RateLimited(RateLimitSignal),
    ServerError(u16),
}

/// Classify `resp` for a lookup of `kind`.
///
/// Only a 200 whose body does not parse as the expected records is an error
/// here; every status code maps to a variant.
pub fn classify(kind: LookupKind, resp: &RawResponse, target: &str) -> Result<Classification> {
    let class = match resp.status {
        200 => Classification::Found(parse_payload(kind, resp.body.as_deref(), target)?),
        404 => Classification::NotFound,
        400 => Classification::InvalidInput,
        429 => Classification::RateLimited(RateLimitSignal {
            wait: retry_after(resp),
        }),
        other => Classification::ServerError(other),
    };
    Ok(class)
}

fn parse_payload(kind: LookupKind, body: Option<&str>, target: &str) -> Result<Payload> {
    let body = body.map(str::trim).filter(|b| !b.is_empty()).unwrap_or("[]");
    let decode = |source: serde_json::Error| CheckError::Decode {
        target: target.to_string(),
        source,
    };
    let payload = match kind {
        LookupKind::Breach => Payload::Breaches(serde_json::from_str::<Vec<BreachRecord>>(body).map_err(decode)?),
        LookupKind::Paste => Payload::Pastes(serde_json::from_str::<Vec<PasteRecord>>(body).map_err(decode)?),
    };
    Ok(payload)
}

/// `Retry-After` in seconds, integer or fractional.
pub fn retry_after(resp: &RawResponse) -> Duration {
    let raw = resp.headers.get(RETRY_AFTER).and_then(|v| v.to_str().ok());
    match raw.and_then(parse_seconds) {
        Some(wait) => wait,
        None => {
            tracing::warn!(header = ?raw, "no usable Retry-After, waiting {:?}", FALLBACK_RETRY_AFTER);
            FALLBACK_RETRY_AFTER
        }
    }
}

fn parse_seconds(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    // Negative, NaN and values past Duration::MAX are unusable.
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breach(resp: RawResponse) -> Result<Classification> {
        classify(LookupKind::Breach, &resp, "breachedaccount/a%40x.com")
    }

    #[test]
    fn not_found_is_not_an_error() {
        assert_eq!(breach(RawResponse::new(404)).unwrap(), Classification::NotFound);
        let paste = classify(LookupKind::Paste, &RawResponse::new(404), "pasteaccount/a").unwrap();
        assert_eq!(paste, Classification::NotFound);
    }

    #[test]
    fn ok_parses_breach_names() {
        let resp = RawResponse::new(200).with_body(r#"[{"Name":"Adobe"},{"Name":"LinkedIn"}]"#);
        match breach(resp).unwrap() {
            Classification::Found(Payload::Breaches(b)) => {
                let names: Vec<_> = b.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, ["Adobe", "LinkedIn"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ok_with_empty_array_is_found_but_empty() {
        match breach(RawResponse::new(200).with_body("[]")).unwrap() {
            Classification::Found(p) => assert!(p.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
        match breach(RawResponse::new(200)).unwrap() {
            Classification::Found(p) => assert!(p.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ok_with_garbage_is_decode_error() {
        let err = breach(RawResponse::new(200).with_body("<html>")).unwrap_err();
        assert!(matches!(err, CheckError::Decode { .. }));
    }

    #[test]
    fn bad_request_is_invalid_input() {
        assert_eq!(breach(RawResponse::new(400)).unwrap(), Classification::InvalidInput);
    }

    #[test]
    fn throttled_reads_retry_after_in_seconds() {
        let resp = RawResponse::new(429).with_header("retry-after", "2");
        assert_eq!(
            breach(resp).unwrap(),
            Classification::RateLimited(RateLimitSignal { wait: Duration::from_secs(2) })
        );
        let resp = RawResponse::new(429).with_header("retry-after", "1.5");
        assert_eq!(
            breach(resp).unwrap(),
            Classification::RateLimited(RateLimitSignal { wait: Duration::from_millis(1500) })
        );
    }

    #[test]
    fn throttled_without_header_uses_fallback() {
        for resp in [
            RawResponse::new(429),
            RawResponse::new(429).with_header("retry-after", "soon"),
            RawResponse::new(429).with_header("retry-after", "-3"),
            RawResponse::new(429).with_header("retry-after", "99999999999999999999"),
            RawResponse::new(429).with_header("retry-after", "18446744073709551615"),
            RawResponse::new(429).with_header("retry-after", "inf"),
        ] {
            assert_eq!(
                breach(resp).unwrap(),
                Classification::RateLimited(RateLimitSignal { wait: FALLBACK_RETRY_AFTER })
            );
        }
    }

    #[test]
    fn header_name_case_does_not_matter() {
        let resp = RawResponse::new(429).with_header("Retry-After", "7");
        assert_eq!(
            breach(resp).unwrap(),
            Classification::RateLimited(RateLimitSignal { wait: Duration::from_secs(7) })
        );
    }

    #[test]
    fn other_statuses_are_server_errors() {
        for status in [401, 403, 500, 503] {
            assert_eq!(breach(RawResponse::new(status)).unwrap(), Classification::ServerError(status));
        }
    }
}
