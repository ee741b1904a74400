//! In-memory host template store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::error::StoreError;
use crate::store::{ChangeListener, SubscriptionId, TemplateStore};
use crate::template::Template;

/// Pluggable structural rule set.
pub type StructuralRules = Arc<dyn Fn(&Template) -> Result<(), StoreError> + Send + Sync>;

/// Reference in-process implementation of [`TemplateStore`].
///
/// Listeners run after the write lock is released, so they are free to
/// re-enter the store.
pub struct MemoryTemplateStore {
    template: RwLock<Template>,
    listeners: Mutex<Vec<(SubscriptionId, ChangeListener)>>,
    next_subscription: AtomicU64,
    rules: StructuralRules,
}

impl MemoryTemplateStore {
    pub fn new(template: Template) -> Self {
        Self::with_rules(template, Arc::new(structural_rules))
    }

    pub fn with_rules(template: Template, rules: StructuralRules) -> Self {
        Self {
            template: RwLock::new(template),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            rules,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn get_template(&self) -> Result<Template, StoreError> {
        Ok(self.template.read().clone())
    }

    fn update_template(&self, template: Template) -> Result<(), StoreError> {
        *self.template.write() = template;
        let listeners: Vec<ChangeListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        trace!(listener_count = listeners.len(), "template replaced, notifying");
        for listener in listeners {
            listener();
        }
        Ok(())
    }

    fn check_template(&self, template: &Template) -> Result<(), StoreError> {
        (self.rules)(template)
    }

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().retain(|(existing, _)| *existing != id);
    }
}

/// Default structural rules: at least one page, non-empty field names,
/// non-empty type strings.
pub fn structural_rules(template: &Template) -> Result<(), StoreError> {
    if template.pages.is_empty() {
        return Err(StoreError::Validation("template has no pages".to_owned()));
    }
    for (page_index, page) in template.pages.iter().enumerate() {
        for (name, field) in page.iter() {
            if name.is_empty() {
                return Err(StoreError::Validation(format!(
                    "page {page_index} contains a field with an empty name"
                )));
            }
            if field.field_type.as_str().is_empty() {
                return Err(StoreError::Validation(format!(
                    "field '{name}' on page {page_index} has an empty type"
                )));
            }
        }
    }
    Ok(())
}
