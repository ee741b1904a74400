//! Template file watch bridge.
//!
//! Watches an authored template JSON file and pushes every on-disk edit
//! into an in-process store, which drives registry recomputation. Group
//! and commit activity streams back through the event bus.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::store::{MemoryTemplateStore, TemplateStore};
use crate::sync::events::{SyncEventBus, SyncEventEnvelope};
use crate::sync::registry::SyncGroupRegistry;
use crate::template::Template;

/// Watch bridge configuration
pub struct WatchConfig {
    /// Template JSON file to watch
    pub template_path: PathBuf,
    /// Debounce window in milliseconds
    pub debounce_ms: u64,
}

/// Read the template file and replace the stored template with it.
pub fn reload_from_disk(store: &dyn TemplateStore, path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    let template = Template::from_json(&raw)
        .with_context(|| format!("parsing template {}", path.display()))?;
    store
        .update_template(template)
        .context("replacing stored template")?;
    Ok(())
}

/// Watch the template file until the watcher channel closes.
///
/// Each detected change reloads the file into the store; mid-save or
/// malformed JSON is logged and skipped, keeping the previous state.
pub fn run_watch(
    config: WatchConfig,
    mut on_event: impl FnMut(SyncEventEnvelope),
) -> Result<()> {
    let raw = fs::read_to_string(&config.template_path)
        .with_context(|| format!("reading template {}", config.template_path.display()))?;
    let template = Template::from_json(&raw)
        .with_context(|| format!("parsing template {}", config.template_path.display()))?;
    let store: Arc<dyn TemplateStore> = Arc::new(MemoryTemplateStore::new(template));

    let (bus, events) = SyncEventBus::new_pair();
    let registry = SyncGroupRegistry::attach_with_events(Arc::clone(&store), bus)
        .context("attaching sync registry")?;
    drain(&events, &mut on_event);

    let (fs_tx, fs_rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |result| {
        let _ = fs_tx.send(result);
    })
    .context("creating file watcher")?;

    let target = config
        .template_path
        .canonicalize()
        .unwrap_or_else(|_| config.template_path.clone());
    // Editors replace files by rename; watching the parent directory keeps
    // the watch alive across that.
    let watch_root = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    watcher
        .watch(&watch_root, RecursiveMode::NonRecursive)
        .with_context(|| format!("watching {}", watch_root.display()))?;
    info!(path = %target.display(), "watching template");

    let debounce = Duration::from_millis(config.debounce_ms);
    while let Ok(result) = fs_rx.recv() {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "file watcher error");
                continue;
            }
        };
        if !is_relevant(&event, &target) {
            continue;
        }

        // Let the editor finish writing, then fold the burst into one reload.
        std::thread::sleep(debounce);
        while fs_rx.try_recv().is_ok() {}

        if let Err(err) = reload_from_disk(store.as_ref(), &target) {
            warn!(error = %err, "template reload failed, keeping previous state");
            continue;
        }
        drain(&events, &mut on_event);
    }

    drop(registry);
    Ok(())
}

fn is_relevant(event: &Event, target: &Path) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|path| path == target || path.file_name() == target.file_name())
}

fn drain(events: &Receiver<SyncEventEnvelope>, on_event: &mut impl FnMut(SyncEventEnvelope)) {
    while let Ok(envelope) = events.try_recv() {
        on_event(envelope);
    }
}
