pub mod store;

pub use store::*;

use std::sync::Arc;
use tokio::sync::RwLock;

/// The bearer credential for the current login, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    /// Bumped on every login and every clear so stale responses can be told apart.
    pub epoch: u64,
}

/// Shared, cloneable view of the session. Only the dashboard controller writes to it.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    /// Install a new token and return the epoch it belongs to.
    pub async fn begin(&self, token: String) -> u64 {
        let mut session = self.inner.write().await;
        session.token = Some(token);
        session.epoch += 1;
        session.epoch
    }

    pub async fn clear(&self) {
        let mut session = self.inner.write().await;
        session.token = None;
        session.epoch += 1;
    }

    pub async fn epoch(&self) -> u64 {
        self.inner.read().await.epoch
    }

    /// Whether a response requested at `epoch` may still be rendered.
    /// Any login or logout since then makes it stale.
    pub async fn is_current(&self, epoch: u64) -> bool {
        self.inner.read().await.epoch == epoch
    }
}
