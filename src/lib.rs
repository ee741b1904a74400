//! Fieldsync: synchronized field propagation for structured document
//! templates.
//!
//! Detects groups of fields that share a naming convention (`title1`,
//! `title2`), mirrors one canonical value across each group, and commits
//! edits through a validation gate so the host template stays structurally
//! valid at every observable instant.

pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod sync;
pub mod template;
pub mod tooling;
