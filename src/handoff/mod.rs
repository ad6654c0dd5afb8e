//! Route handoff
//!
//! Builds the final [`RouteRecord`] and publishes it under a well-known key
//! so the save flow can pick it up exactly once.

pub mod record;
pub mod store;

pub use record::{RouteRecord, RouteRecordBuilder};
pub use store::{FileHandoffStore, HandoffError, HandoffStore, MemoryHandoffStore};

use std::sync::Arc;

/// Key under which the most recent recording is published
pub const RECORDED_ROUTE_KEY: &str = "recordedRouteData";

/// Publishes completed records to a [`HandoffStore`]
#[derive(Clone)]
pub struct RouteHandoff {
    store: Arc<dyn HandoffStore>,
    key: String,
}

impl RouteHandoff {
    pub fn new(store: Arc<dyn HandoffStore>) -> Self {
        Self::with_key(store, RECORDED_ROUTE_KEY)
    }
    
    pub fn with_key(store: Arc<dyn HandoffStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
    
    pub fn key(&self) -> &str {
        &self.key
    }
    
    /// Publish a record, replacing any record not yet picked up
    pub fn publish(&self, record: &RouteRecord) -> Result<(), HandoffError> {
        let json = serde_json::to_string(record)?;
        self.store.put(&self.key, &json)?;
        
        tracing::info!(
            "Handed off route: {} points, {:.1}m, mode {}",
            record.path().len(),
            record.distance_meters(),
            record.transport_mode()
        );
        Ok(())
    }
    
    /// Take the pending record, if any; a second call returns `None`
    ///
    /// A document that does not parse is left in the store.
    pub fn take_pending(&self) -> Result<Option<RouteRecord>, HandoffError> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str::<RouteRecord>(&json)?;
        
        // Another reader may have taken it since the peek
        match self.store.take(&self.key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
