use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Fixed key the bearer token lives under.
pub const TOKEN_KEY: &str = "ezyago_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store error: {0}")]
    Backend(#[from] sled::Error),
    #[error("stored token is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Durable home for the session token. Holds at most one token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, StoreError>;
    async fn save(&self, token: &str) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Token persisted in an embedded sled database.
pub struct SledTokenStore {
    db: sled::Db,
}

impl SledTokenStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    #[cfg(test)]
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }
}

#[async_trait]
impl TokenStore for SledTokenStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        match self.db.get(TOKEN_KEY)? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes.to_vec())?)),
            None => Ok(None),
        }
    }

    async fn save(&self, token: &str) -> Result<(), StoreError> {
        self.db.insert(TOKEN_KEY, token.as_bytes())?;
        self.db.flush_async().await?;
        debug!("Session token persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.db.remove(TOKEN_KEY)?;
        self.db.flush_async().await?;
        debug!("Session token removed");
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryTokenStore;
