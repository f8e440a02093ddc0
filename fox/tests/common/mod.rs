#![allow(dead_code)]

use std::future::Ready;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::{DashMap, DashSet};
use fox::{CachedResponse, OutboundRequest, Upstream, UpstreamError};

/// Upstream double that answers from a per-identifier table and counts calls.
///
/// The identifier is the value of the `id` query parameter. Unknown
/// identifiers answer 404; identifiers in `failing` fail at the transport.
#[derive(Clone, Default)]
pub struct ScriptedUpstream {
    bodies: Arc<DashMap<String, String>>,
    failing: Arc<DashSet<String>>,
    calls: Arc<DashMap<String, usize>>,
    total: Arc<AtomicUsize>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, id: &str, body: &str) -> Self {
        self.bodies.insert(id.to_string(), body.to_string());
        self
    }

    pub fn fail(self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls_for(&self, id: &str) -> usize {
        self.calls.get(id).map(|c| *c).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl Upstream for ScriptedUpstream {
    type Future = Ready<Result<CachedResponse, UpstreamError>>;

    fn call(&mut self, req: OutboundRequest) -> Self::Future {
        let id = req.parameters.get("id").cloned().unwrap_or_default();
        let url = format!("{}?id={}", req.base, id);
        *self.calls.entry(id.clone()).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(&id) {
            return std::future::ready(Err(UpstreamError::new(url, "connection reset")));
        }
        let response = match self.bodies.get(&id) {
            Some(body) => CachedResponse::new(200, url, body.clone()),
            None => CachedResponse::new(404, url, "not found"),
        };
        std::future::ready(Ok(response))
    }
}
