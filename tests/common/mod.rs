#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pwn_hunter::progress::Progress;
use pwn_hunter::{BreachApi, Lookup, RawResponse, Result};
use tokio::time::Instant;

/// In-memory stand-in for the service. Each request target answers from its
/// own queue; an exhausted or unscripted target answers 404.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<HashMap<String, VecDeque<RawResponse>>>,
    calls: Mutex<Vec<(Lookup, Instant)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, lookup: Lookup, resp: RawResponse) -> Self {
        self.script
            .lock()
            .unwrap()
            .entry(lookup.path())
            .or_default()
            .push_back(resp);
        self
    }

    pub fn calls(&self) -> Vec<Lookup> {
        self.calls.lock().unwrap().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    pub fn calls_to(&self, lookup: &Lookup) -> usize {
        self.calls.lock().unwrap().iter().filter(|(l, _)| l == lookup).count()
    }
}

#[async_trait]
impl BreachApi for ScriptedApi {
    async fn send(&self, lookup: &Lookup) -> Result<RawResponse> {
        self.calls.lock().unwrap().push((lookup.clone(), Instant::now()));
        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(&lookup.path())
            .and_then(VecDeque::pop_front);
        Ok(next.unwrap_or_else(|| RawResponse::new(404)))
    }
}

pub fn found(body: &str) -> RawResponse {
    RawResponse::new(200).with_body(body)
}

pub fn throttled(retry_after: &str) -> RawResponse {
    RawResponse::new(429).with_header("retry-after", retry_after)
}

/// Progress sink that remembers every update for later inspection.
#[derive(Clone, Default)]
pub struct RecordingProgress {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl Progress for RecordingProgress {
    fn start(&mut self, total: usize) {
        self.events.lock().unwrap().push(format!("start {}", total));
    }

    fn advance(&mut self, done: usize, total: usize) {
        self.events.lock().unwrap().push(format!("{}/{}", done, total));
    }

    fn finish(&mut self) {
        self.events.lock().unwrap().push("finish".to_string());
    }
}

pub fn addresses(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
