//! Sync-group registry and change-listener bridge.
//!
//! Holds the current set of detected groups, recomputes them wholesale on
//! every host change notification, and serializes edits through the
//! validation-gated commit path.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::store::{SubscriptionId, TemplateStore};
use crate::sync::commit::commit_checked;
use crate::sync::detect::{detect_groups, SyncGroup};
use crate::sync::events::{SyncEvent, SyncEventBus};
use crate::sync::propagate::build_candidate;

/// Registry lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// No host store bound (pre-attach or post-detach).
    Unattached,
    /// Recomputing groups from the live template.
    Detecting,
    /// Cached groups available; awaiting changes or edits.
    Idle,
    /// One propagation running; further edits are rejected until it lands.
    Propagating,
}

struct RegistryInner {
    state: Mutex<RegistryState>,
    groups: RwLock<Vec<SyncGroup>>,
    events: Option<SyncEventBus>,
}

/// Registry of detected sync groups, driven by host change notifications.
///
/// Each detection pass fully discards and rebuilds the group set; groups
/// are never patched incrementally. Dropping the registry unsubscribes its
/// change listener, and the listener itself holds only weak references, so
/// a forgotten registry can neither leak a callback nor keep the store
/// alive.
pub struct SyncGroupRegistry {
    inner: Arc<RegistryInner>,
    store: Arc<dyn TemplateStore>,
    subscription: SubscriptionId,
}

impl SyncGroupRegistry {
    /// Bind to a host store and run the initial detection pass.
    pub fn attach(store: Arc<dyn TemplateStore>) -> Result<Self, SyncError> {
        Self::attach_inner(store, None)
    }

    /// Bind to a host store, reporting activity on the given bus.
    pub fn attach_with_events(
        store: Arc<dyn TemplateStore>,
        events: SyncEventBus,
    ) -> Result<Self, SyncError> {
        Self::attach_inner(store, Some(events))
    }

    fn attach_inner(
        store: Arc<dyn TemplateStore>,
        events: Option<SyncEventBus>,
    ) -> Result<Self, SyncError> {
        // An unreadable store must not leave a subscription behind.
        store.get_template()?;

        let inner = Arc::new(RegistryInner {
            state: Mutex::new(RegistryState::Idle),
            groups: RwLock::new(Vec::new()),
            events,
        });

        let listener = {
            let inner = Arc::downgrade(&inner);
            let store = Arc::downgrade(&store);
            Arc::new(move || {
                Self::on_change(&inner, &store);
            })
        };
        let subscription = store.subscribe(listener);

        let registry = Self {
            inner,
            store,
            subscription,
        };
        registry.recompute_now();
        Ok(registry)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RegistryState {
        *self.inner.state.lock()
    }

    /// Snapshot of the detected groups.
    pub fn groups(&self) -> Vec<SyncGroup> {
        self.inner.groups.read().clone()
    }

    /// One group by base name, if detected.
    pub fn group(&self, base_name: &str) -> Option<SyncGroup> {
        self.inner
            .groups
            .read()
            .iter()
            .find(|group| group.base_name == base_name)
            .cloned()
    }

    /// Propagate `new_value` to every member of the named group.
    ///
    /// At most one propagation runs at a time per registry; a second call
    /// while one is in flight is rejected rather than built against a
    /// baseline the in-flight commit is about to replace. On rejection by
    /// the host validator the store and the cached groups are left exactly
    /// as they were.
    pub fn set_group_value(&self, base_name: &str, new_value: &str) -> Result<(), SyncError> {
        {
            let mut state = self.inner.state.lock();
            match *state {
                RegistryState::Unattached => return Err(SyncError::Unattached),
                RegistryState::Propagating => return Err(SyncError::PropagationInFlight),
                _ => *state = RegistryState::Propagating,
            }
        }

        let result = self.propagate(base_name, new_value);
        *self.inner.state.lock() = RegistryState::Idle;

        if let Some(bus) = &self.inner.events {
            match &result {
                Ok(()) => bus.emit(SyncEvent::ValueCommitted {
                    base_name: base_name.to_owned(),
                    value: new_value.to_owned(),
                }),
                Err(SyncError::CandidateRejected { reason }) => {
                    bus.emit(SyncEvent::CandidateRejected {
                        base_name: base_name.to_owned(),
                        reason: reason.clone(),
                    })
                }
                Err(_) => {}
            }
        }
        result
    }

    fn propagate(&self, base_name: &str, new_value: &str) -> Result<(), SyncError> {
        let group = self
            .group(base_name)
            .ok_or_else(|| SyncError::UnknownGroup(base_name.to_owned()))?;
        let template = self.store.get_template()?;
        let candidate = build_candidate(&template, &group, new_value);
        commit_checked(self.store.as_ref(), candidate)?;

        // A synchronous host has already echoed the commit back through the
        // change listener; refresh the cached value anyway for hosts that
        // notify later.
        if let Some(cached) = self
            .inner
            .groups
            .write()
            .iter_mut()
            .find(|group| group.base_name == base_name)
        {
            cached.current_value = new_value.to_owned();
        }
        Ok(())
    }

    /// Explicit teardown; equivalent to dropping the registry.
    pub fn detach(self) {
        drop(self);
    }

    fn recompute_now(&self) {
        Self::on_change(
            &Arc::downgrade(&self.inner),
            &Arc::downgrade(&self.store),
        );
    }

    fn on_change(inner: &Weak<RegistryInner>, store: &Weak<dyn TemplateStore>) {
        let (Some(inner), Some(store)) = (inner.upgrade(), store.upgrade()) else {
            return;
        };

        let echo = {
            let mut state = inner.state.lock();
            match *state {
                RegistryState::Unattached => return,
                // The registry's own commit echoing back mid-propagation:
                // recompute without leaving Propagating.
                RegistryState::Propagating => true,
                _ => {
                    *state = RegistryState::Detecting;
                    false
                }
            }
        };

        Self::recompute(&inner, store.as_ref());

        if !echo {
            let mut state = inner.state.lock();
            if *state == RegistryState::Detecting {
                *state = RegistryState::Idle;
            }
        }
    }

    fn recompute(inner: &RegistryInner, store: &dyn TemplateStore) {
        let template = match store.get_template() {
            Ok(template) => template,
            Err(err) => {
                // A failed read aborts the pass; the previous groups stay
                // visible.
                warn!(error = %err, "template read failed during group recomputation");
                return;
            }
        };

        let groups = template
            .first_page()
            .map(detect_groups)
            .unwrap_or_default();
        let group_count = groups.len();
        debug!(group_count, "sync groups recomputed");

        *inner.groups.write() = groups;
        if let Some(bus) = &inner.events {
            bus.emit(SyncEvent::GroupsRecomputed { group_count });
        }
    }
}

impl Drop for SyncGroupRegistry {
    fn drop(&mut self) {
        *self.inner.state.lock() = RegistryState::Unattached;
        self.store.unsubscribe(self.subscription);
    }
}
