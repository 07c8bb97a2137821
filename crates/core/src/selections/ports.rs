//! Port interface for persisting modal filter selections
//!
//! The modal filter dialog remembers its selections across sessions through
//! a small key-value store (the browser-localStorage analog).

use async_trait::async_trait;
use promoboard_domain::{Result, SavedSelections};

/// Trait for loading and saving the modal selection set
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Load the persisted selections, if any were ever saved
    async fn load(&self) -> Result<Option<SavedSelections>>;

    /// Persist the given selections, replacing any previous set
    async fn save(&self, selections: &SavedSelections) -> Result<()>;
}
