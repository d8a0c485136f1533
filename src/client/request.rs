use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::error::{ClientError, ClientResult};
use super::response::{error_message, ResponseBody};
use super::transport::{HttpRequest, Method, Transport};
use crate::session::SessionHandle;

/// Performs one call against the dashboard API and normalizes the outcome.
///
/// Reads the session token but never changes it; callers decide what a failure means
/// for the session.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    session: SessionHandle,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionHandle) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub async fn call<B: Serialize + ?Sized>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> ClientResult<Value> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token().await {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ClientError::Validation(format!("Could not encode request: {}", e)))?;

        debug!("API call: {} {}", method, path);

        let request = HttpRequest {
            method,
            path: path.to_string(),
            headers,
            body,
        };

        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Transport failure on {} {}: {}", method, path, e);
                return Err(ClientError::connectivity());
            }
        };

        let decoded = ResponseBody::decode(&resp);
        if !resp.is_success() {
            let message = error_message(resp.status, &decoded);
            warn!("API error on {} {} ({}): {}", method, path, resp.status, message);
            return Err(ClientError::Request {
                status: resp.status,
                message,
            });
        }

        Ok(decoded.into_payload())
    }

    /// `call` without a body.
    pub async fn send(&self, path: &str, method: Method) -> ClientResult<Value> {
        self.call::<Value>(path, method, None).await
    }
}
