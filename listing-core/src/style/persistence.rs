//! Persistence seam for canvas style mutations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Errors reported by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// The store refused the write.
    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Durable storage for flat style records, keyed by post id.
#[async_trait]
pub trait StylePersistence: Send + Sync {
    /// Merge `patch` (a flat JSON object) into the record of `post_id`.
    async fn save(&self, post_id: &str, patch: &Value) -> Result<(), PersistError>;
}

/// In-memory store, shareable across tasks.
///
/// Can be switched into a failing mode to exercise rejection paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    records: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryPersistence {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The stored record for `post_id`.
    #[must_use]
    pub fn load(&self, post_id: &str) -> Option<Value> {
        let records = self
            .records
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        records.get(post_id).cloned().map(Value::Object)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StylePersistence for MemoryPersistence {
    async fn save(&self, post_id: &str, patch: &Value) -> Result<(), PersistError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable("memory store offline".to_string()));
        }
        let Some(fields) = patch.as_object() else {
            return Err(PersistError::Rejected(format!(
                "patch for {post_id} is not an object"
            )));
        };

        let mut records = self
            .records
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = records.entry(post_id.to_string()).or_default();
        for (key, value) in fields {
            record.insert(key.clone(), value.clone());
        }
        tracing::debug!(post_id, fields = fields.len(), "Style patch stored");
        Ok(())
    }
}
