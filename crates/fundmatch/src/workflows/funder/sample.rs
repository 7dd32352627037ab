//! Built-in dashboard data used by the demo, the CLI and as the default record
//! source when no CSV export is configured.

use super::applications::domain::ApplicationRecord;
use super::applications::repository::{ensure_unique_ids, RecordSource, SourceError};
use super::grants::GrantSummary;

const SAMPLE_APPLICATIONS: &str =
    include_str!("../../../data/sample_applications.json");
const SAMPLE_GRANTS: &str = include_str!("../../../data/sample_grants.json");

/// The eight sample applications shown on the funder dashboard.
pub fn sample_records() -> Result<Vec<ApplicationRecord>, SourceError> {
    let records: Vec<ApplicationRecord> = serde_json::from_str(SAMPLE_APPLICATIONS)
        .map_err(|err| SourceError::Unavailable(format!("sample applications: {err}")))?;
    ensure_unique_ids(records)
}

/// The funder's three sample grants.
pub fn sample_grants() -> Result<Vec<GrantSummary>, serde_json::Error> {
    serde_json::from_str(SAMPLE_GRANTS)
}

/// Record source backed by [`sample_records`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleRecords;

impl RecordSource for SampleRecords {
    fn load(&self) -> Result<Vec<ApplicationRecord>, SourceError> {
        sample_records()
    }
}
