//! Candidate template construction for group edits.

use std::sync::Arc;

use tracing::debug;

use crate::sync::detect::SyncGroup;
use crate::template::Template;

/// Build a candidate template with every group member's content set to
/// `new_value`.
///
/// The input template is never mutated. The affected page is copied once;
/// all other pages stay `Arc`-shared with the original. Members that no
/// longer exist in the live page are skipped: the group was detected
/// against an older template generation and the next recompute will drop
/// them.
pub fn build_candidate(template: &Template, group: &SyncGroup, new_value: &str) -> Template {
    let mut candidate = template.clone();
    let Some(page) = candidate.pages.first_mut() else {
        return candidate;
    };
    let page = Arc::make_mut(page);

    for member in &group.members {
        match page.get_mut(member) {
            Some(field) => field.content = Some(new_value.to_owned()),
            None => debug!(
                member = %member,
                base_name = %group.base_name,
                "sync member missing from live page, skipping"
            ),
        }
    }

    candidate
}
