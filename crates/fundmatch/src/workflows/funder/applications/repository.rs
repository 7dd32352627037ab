use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationRecord};
use crate::workflows::funder::import::CsvImportError;

/// Supplies the full, unfiltered application collection when a table mounts.
pub trait RecordSource: Send + Sync {
    fn load(&self) -> Result<Vec<ApplicationRecord>, SourceError>;
}

/// Error enumeration for record source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("duplicate application id '{0}'")]
    DuplicateId(ApplicationId),
    #[error(transparent)]
    Import(#[from] CsvImportError),
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Rejects collections in which an id appears twice.
pub fn ensure_unique_ids(
    records: Vec<ApplicationRecord>,
) -> Result<Vec<ApplicationRecord>, SourceError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            return Err(SourceError::DuplicateId(record.id.clone()));
        }
    }
    Ok(records)
}

/// Actions offered by the bulk-action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Approve,
    Reject,
    Export,
}

impl BulkAction {
    pub const fn label(self) -> &'static str {
        match self {
            BulkAction::Approve => "approve",
            BulkAction::Reject => "reject",
            BulkAction::Export => "export",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BulkAction {
    type Err = UnknownBulkAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(BulkAction::Approve),
            "reject" => Ok(BulkAction::Reject),
            "export" => Ok(BulkAction::Export),
            _ => Err(UnknownBulkAction(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bulk action '{0}' (expected approve, reject or export)")]
pub struct UnknownBulkAction(pub String);

/// Payload handed to the external bulk-action handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    pub action: BulkAction,
    pub application_ids: Vec<ApplicationId>,
}

/// Outbound hook performing approve, reject and export for a set of ids.
///
/// Completion is fire-and-forget from the desk's point of view; nothing the
/// handler returns beyond success or failure is consumed.
pub trait BulkActionDispatcher: Send + Sync {
    fn dispatch(&self, request: BulkActionRequest) -> Result<(), DispatchError>;
}

/// Bulk dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("bulk action transport unavailable: {0}")]
    Transport(String),
    #[error("bulk action rejected: {0}")]
    Rejected(String),
}
