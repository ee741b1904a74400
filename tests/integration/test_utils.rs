//! Shared test utilities for integration tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fieldsync::error::StoreError;
use fieldsync::store::{
    ChangeListener, MemoryTemplateStore, SubscriptionId, TemplateStore,
};
use fieldsync::template::{FieldDefinition, FieldType, Page, Template};

/// Build a page from `(name, type, content)` triples.
pub fn page(fields: &[(&str, FieldType, &str)]) -> Page {
    let mut page = Page::new();
    for (name, field_type, content) in fields {
        page.insert(
            *name,
            FieldDefinition::with_content(field_type.clone(), *content),
        );
    }
    page
}

/// Single-page template from `(name, type, content)` triples.
pub fn template(fields: &[(&str, FieldType, &str)]) -> Template {
    Template::new(vec![page(fields)])
}

/// Store wrapper that counts `update_template` calls, for asserting the
/// validation gate never lets a rejected candidate through.
pub struct CountingStore {
    inner: MemoryTemplateStore,
    updates: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryTemplateStore) -> Self {
        Self {
            inner,
            updates: AtomicUsize::new(0),
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl TemplateStore for CountingStore {
    fn get_template(&self) -> Result<Template, StoreError> {
        self.inner.get_template()
    }

    fn update_template(&self, template: Template) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_template(template)
    }

    fn check_template(&self, template: &Template) -> Result<(), StoreError> {
        self.inner.check_template(template)
    }

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.unsubscribe(id)
    }
}

/// Rules closure that rejects every candidate with the given reason.
pub fn rejecting_rules(reason: &str) -> Arc<dyn Fn(&Template) -> Result<(), StoreError> + Send + Sync>
{
    let reason = reason.to_owned();
    Arc::new(move |_| Err(StoreError::Validation(reason.clone())))
}
