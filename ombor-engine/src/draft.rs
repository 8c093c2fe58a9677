//! Draft persistence seam
//!
//! An in-progress entry (context plus line items) can be snapshotted and
//! restored across sessions. Storage is behind a trait so the host decides
//! where drafts live; the engine only defines the shape.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{EntryContext, LineItem};

/// Serializable snapshot of an in-progress entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub context: EntryContext,
    pub items: Vec<LineItem>,
}

/// Where drafts are kept. Keyed so one store can hold separate drafts for
/// new entries and per-entry edits.
pub trait DraftStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<DraftSnapshot>>;
    fn set(&self, key: &str, snapshot: &DraftSnapshot) -> AppResult<()>;
    fn clear(&self, key: &str) -> AppResult<()>;
}

/// In-memory store, used in tests and as a session-scoped fallback
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> AppResult<Option<DraftSnapshot>> {
        let drafts = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        match drafts.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, snapshot: &DraftSnapshot) -> AppResult<()> {
        let raw = serde_json::to_string(snapshot)?;
        let mut drafts = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        drafts.insert(key.to_string(), raw);
        Ok(())
    }

    fn clear(&self, key: &str) -> AppResult<()> {
        let mut drafts = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        drafts.remove(key);
        Ok(())
    }
}
