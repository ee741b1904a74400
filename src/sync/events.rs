//! Recomputation and commit notifications for attached presentation layers.
//!
//! The registry emits onto an in-process bus; whatever presentation layer is
//! attached drains the receiving end. Emission is fire-and-forget so a slow
//! or absent consumer can never stall a commit.

use std::sync::mpsc::{channel, Receiver, Sender};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What happened inside the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    GroupsRecomputed {
        group_count: usize,
    },
    ValueCommitted {
        base_name: String,
        value: String,
    },
    CandidateRejected {
        base_name: String,
        reason: String,
    },
}

/// An event plus its emission timestamp (RFC 3339, UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEventEnvelope {
    pub ts: String,
    #[serde(flatten)]
    pub event: SyncEvent,
}

/// In-process event bus between the registry and a presentation layer.
#[derive(Clone)]
pub struct SyncEventBus {
    sender: Sender<SyncEventEnvelope>,
}

impl SyncEventBus {
    pub fn new_pair() -> (Self, Receiver<SyncEventEnvelope>) {
        let (sender, receiver) = channel();
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: SyncEvent) {
        let envelope = SyncEventEnvelope {
            ts: Utc::now().to_rfc3339(),
            event,
        };
        let _ = self.sender.send(envelope);
    }
}
