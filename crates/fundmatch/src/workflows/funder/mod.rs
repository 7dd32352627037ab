pub mod applications;
pub mod grants;
pub mod import;
pub mod sample;

pub use grants::{GrantPortfolio, GrantStatus, GrantSummary};
pub use import::{CsvImportError, CsvRecordSource};
pub use sample::{sample_grants, sample_records, SampleRecords};
