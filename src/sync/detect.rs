//! Sync-group detection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::template::{parse_field_name, Page};

/// A set of fields sharing a naming convention, mirrored to one logical
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncGroup {
    /// Shared letter prefix, e.g. `title` for `title1`/`title2`.
    pub base_name: String,
    /// Member field names in field-iteration order.
    pub members: Vec<String>,
    /// The member treated as the source of truth.
    pub canonical: String,
    /// Value seeded from the canonical field at detection time.
    pub current_value: String,
}

/// Derive sync groups from a page's field mapping.
///
/// Pure and total: ineligible fields are skipped, never an error. Fields
/// are visited in insertion order; groups come out in first-encounter order
/// of their base name. A group needs at least two eligible members. The
/// canonical member is the first whose name ends in the digit `1`, falling
/// back to the first member.
pub fn detect_groups(page: &Page) -> Vec<SyncGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Vec<&str>> = HashMap::new();

    for (name, field) in page.iter() {
        if !field.field_type.is_syncable() {
            continue;
        }
        let Some((prefix, _)) = parse_field_name(name) else {
            continue;
        };
        buckets
            .entry(prefix)
            .or_insert_with(|| {
                order.push(prefix);
                Vec::new()
            })
            .push(name);
    }

    order
        .into_iter()
        .filter_map(|base_name| {
            let members = &buckets[base_name];
            if members.len() < 2 {
                return None;
            }
            let canonical = members
                .iter()
                .copied()
                .find(|member| member.ends_with('1'))
                .unwrap_or(members[0]);
            let current_value = page
                .get(canonical)
                .map(|field| field.content_or_empty().to_owned())
                .unwrap_or_default();
            Some(SyncGroup {
                base_name: base_name.to_owned(),
                members: members.iter().map(|member| (*member).to_owned()).collect(),
                canonical: canonical.to_owned(),
                current_value,
            })
        })
        .collect()
}
