//! Validation-gated commit of candidate templates.

use crate::error::{StoreError, SyncError};
use crate::store::TemplateStore;
use crate::template::Template;

/// Validate a candidate against the host's structural rules, then commit it.
///
/// All-or-nothing: on rejection the store is untouched and the rejection is
/// surfaced to the caller; on success the store holds the candidate before
/// this returns. No intermediate state is ever observable.
pub fn commit_checked(
    store: &dyn TemplateStore,
    candidate: Template,
) -> Result<Template, SyncError> {
    if let Err(err) = store.check_template(&candidate) {
        return Err(match err {
            StoreError::Validation(reason) => SyncError::CandidateRejected { reason },
            other => SyncError::Store(other),
        });
    }
    store.update_template(candidate.clone())?;
    Ok(candidate)
}
