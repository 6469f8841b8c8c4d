pub mod api;
pub mod batch;
pub mod checker;
pub mod classify;
pub mod config;
pub mod error;
pub mod http_client;
pub mod output;
pub mod progress;
pub mod records;
pub mod utils;

// re-export the types the binary and tests reach for
pub use crate::api::{BreachApi, HibpClient, Lookup, LookupKind, RawResponse};
pub use crate::batch::{AddressDetail, BatchController, BatchReport};
pub use crate::checker::{CheckResult, Checker};
pub use crate::classify::{classify, Classification, RateLimitSignal};
pub use crate::config::Config;
pub use crate::error::{CheckError, Result};
pub use crate::records::{BreachRecord, PasteRecord, Payload};
