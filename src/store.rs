//! Host template store capability.
//!
//! The subsystem never owns a mutable template; it acts through this
//! injected capability: read, replace, validate, and a change subscription
//! with an explicit unsubscribe pair.

pub mod memory;

pub use memory::{structural_rules, MemoryTemplateStore, StructuralRules};

use std::sync::Arc;

use crate::error::StoreError;
use crate::template::Template;

/// Callback invoked after any actor replaces the stored template.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Handle identifying one change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Host template store: the single mutable template this subsystem acts on.
pub trait TemplateStore: Send + Sync {
    /// Current template. Callers re-read before every operation; the
    /// subsystem never caches a private copy across calls.
    fn get_template(&self) -> Result<Template, StoreError>;

    /// Replace the stored template and notify subscribers.
    fn update_template(&self, template: Template) -> Result<(), StoreError>;

    /// Structural validation. Returns `Err(StoreError::Validation)` on a
    /// rule violation and leaves the stored template untouched.
    fn check_template(&self, template: &Template) -> Result<(), StoreError>;

    /// Register a change listener, fired after every update (including
    /// updates made by the subscriber itself).
    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId;

    /// Drop a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
