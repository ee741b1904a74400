//! File-to-store bridge used by watch mode.

use std::fs;
use std::sync::Arc;

use fieldsync::store::{MemoryTemplateStore, TemplateStore};
use fieldsync::sync::registry::SyncGroupRegistry;
use fieldsync::template::FieldType;
use fieldsync::tooling::watch::reload_from_disk;
use tempfile::TempDir;

use super::test_utils::template;

#[test]
fn test_disk_edit_drives_registry_recompute() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("template.json");

    let store = Arc::new(MemoryTemplateStore::new(template(&[
        ("title1", FieldType::Text, "Old"),
        ("title2", FieldType::Text, "Old"),
    ])));
    let registry = SyncGroupRegistry::attach(store.clone()).unwrap();
    assert_eq!(registry.group("title").unwrap().current_value, "Old");

    fs::write(
        &path,
        r#"{"schemas":[{
            "title1": {"type": "text", "content": "From Disk"},
            "title2": {"type": "text", "content": "From Disk"}
        }]}"#,
    )
    .unwrap();
    reload_from_disk(store.as_ref(), &path).unwrap();

    assert_eq!(registry.group("title").unwrap().current_value, "From Disk");
}

#[test]
fn test_malformed_disk_state_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("template.json");
    fs::write(&path, "{ truncated").unwrap();

    let store = Arc::new(MemoryTemplateStore::new(template(&[
        ("title1", FieldType::Text, "Old"),
        ("title2", FieldType::Text, "Old"),
    ])));
    let registry = SyncGroupRegistry::attach(store.clone()).unwrap();

    assert!(reload_from_disk(store.as_ref(), &path).is_err());
    assert_eq!(registry.group("title").unwrap().current_value, "Old");
    assert!(store
        .get_template()
        .unwrap()
        .first_page()
        .unwrap()
        .contains_key("title1"));
}
