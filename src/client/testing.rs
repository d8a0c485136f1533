//! Scripted transport for exercising the dashboard against a fake service.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

type Reply = (Result<HttpResponse, TransportError>, Option<Duration>);
type Route = (Method, String);

#[derive(Default)]
struct Script {
    once: HashMap<Route, VecDeque<Reply>>,
    sticky: HashMap<Route, Reply>,
    calls: Vec<HttpRequest>,
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `method path` with `resp` until replaced.
    pub fn respond(&self, method: Method, path: &str, resp: HttpResponse) {
        self.set(method, path, (Ok(resp), None));
    }

    /// Like `respond`, but the answer arrives after `delay`.
    pub fn respond_after(&self, method: Method, path: &str, resp: HttpResponse, delay: Duration) {
        self.set(method, path, (Ok(resp), Some(delay)));
    }

    /// Answer the next call only; later calls fall back to the sticky reply.
    pub fn respond_once(&self, method: Method, path: &str, resp: HttpResponse) {
        let mut script = self.script.lock().unwrap();
        script
            .once
            .entry((method, path.to_string()))
            .or_default()
            .push_back((Ok(resp), None));
    }

    pub fn unreachable(&self, method: Method, path: &str) {
        self.set(
            method,
            path,
            (Err(TransportError("connection refused".to_string())), None),
        );
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn set(&self, method: Method, path: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .sticky
            .insert((method, path.to_string()), reply);
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (reply, delay) = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(request.clone());
            let route = (request.method, request.path.clone());
            script
                .once
                .get_mut(&route)
                .and_then(VecDeque::pop_front)
                .or_else(|| script.sticky.get(&route).cloned())
                .unwrap_or_else(|| {
                    (
                        Ok(HttpResponse::json(404, json!({"detail": "Not Found"}))),
                        None,
                    )
                })
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}
