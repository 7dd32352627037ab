mod normalizer;
mod parser;

use crate::workflows::funder::applications::domain::ApplicationRecord;
use crate::workflows::funder::applications::repository::{
    ensure_unique_ids, RecordSource, SourceError,
};
use parser::RowError;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CsvImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidScore { line: u64, value: String },
}

impl std::fmt::Display for CsvImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvImportError::Io(err) => write!(f, "failed to read application export: {}", err),
            CsvImportError::Csv(err) => write!(f, "invalid application CSV data: {}", err),
            CsvImportError::InvalidScore { line, value } => write!(
                f,
                "line {}: score '{}' must be an integer between 0 and 100",
                line, value
            ),
        }
    }
}

impl std::error::Error for CsvImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvImportError::Io(err) => Some(err),
            CsvImportError::Csv(err) => Some(err),
            CsvImportError::InvalidScore { .. } => None,
        }
    }
}

impl From<std::io::Error> for CsvImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CsvImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RowError> for CsvImportError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::Csv(err) => Self::Csv(err),
            RowError::InvalidScore { line, value } => Self::InvalidScore { line, value },
        }
    }
}

#[derive(Debug, Clone)]
enum CsvOrigin {
    Path(PathBuf),
    Inline(String),
}

/// Record source reading an application export with one row per application.
///
/// Expected headers: `ID, Company Name, Grant Title, Sector, Stage, Location,
/// Employees, Amount, Status, Priority, Score, Submitted Date, Last Activity,
/// Reviewer, Documents, Chat Messages`. Only `ID`, `Company Name`,
/// `Grant Title`, `Sector` and `Status` are required.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    origin: CsvOrigin,
}

impl CsvRecordSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            origin: CsvOrigin::Path(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_string(csv: impl Into<String>) -> Self {
        Self {
            origin: CsvOrigin::Inline(csv.into()),
        }
    }

    pub fn read<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, CsvImportError> {
        Ok(parser::parse_records(reader)?)
    }

    fn read_origin(&self) -> Result<Vec<ApplicationRecord>, CsvImportError> {
        match &self.origin {
            CsvOrigin::Path(path) => {
                let file = std::fs::File::open(path)?;
                Self::read(file)
            }
            CsvOrigin::Inline(csv) => Self::read(Cursor::new(csv.as_bytes())),
        }
    }
}

impl RecordSource for CsvRecordSource {
    fn load(&self) -> Result<Vec<ApplicationRecord>, SourceError> {
        let records = self.read_origin()?;
        ensure_unique_ids(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::funder::applications::domain::{ApplicationStatus, Priority};

    const HEADER: &str = "ID,Company Name,Grant Title,Sector,Stage,Location,Employees,Amount,Status,Priority,Score,Submitted Date,Last Activity,Reviewer,Documents,Chat Messages";

    #[test]
    fn reads_rows_into_records() {
        let csv = format!(
            "{HEADER}\n\
             1,AI Solutions Inc,Tech Innovation Grant 2024,Technology,Series A,California,35,\"$250,000\",Under Review,High,85,2024-02-15,2024-02-20,John Smith,8,12\n\
             5, EcoMaterials  Corp ,Green Energy Initiative,Clean Energy,Pre-seed,Colorado,3,\"$25,000\",Pending Review,Medium,,2024-02-19,2024-02-19,,5,\n"
        );

        let records = CsvRecordSource::from_string(csv)
            .load()
            .expect("csv loads");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, "$250,000");
        assert_eq!(records[0].status, ApplicationStatus::UnderReview);
        assert_eq!(records[0].priority, Priority::High);
        assert_eq!(records[0].score.value(), 85);
        assert_eq!(records[1].company_name, "EcoMaterials Corp");
        assert!(!records[1].score.is_scored());
        assert!(records[1].reviewer.is_none());
        assert_eq!(records[1].chat_messages, 0);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "ID,Company Name,Grant Title,Sector,Status\n7,AgriTech Solutions,Green Energy Initiative,Agriculture,On Hold\n";

        let records = CsvRecordSource::read(Cursor::new(csv)).expect("csv loads");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].status,
            ApplicationStatus::Unrecognized("On Hold".to_string())
        );
        assert_eq!(records[0].amount, "");
        assert_eq!(records[0].documents, 0);
    }

    #[test]
    fn rejects_out_of_range_scores_with_line_number() {
        let csv = format!(
            "{HEADER}\n1,A,B,C,D,E,1,$1,Approved,Low,90,2024-01-01,2024-01-01,,,\n2,A,B,C,D,E,1,$1,Approved,Low,140,2024-01-01,2024-01-01,,,\n"
        );

        let err = CsvRecordSource::from_string(csv)
            .load()
            .expect_err("score out of range");

        match err {
            SourceError::Import(CsvImportError::InvalidScore { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "140");
            }
            other => panic!("expected invalid score, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let csv = "ID,Company Name,Grant Title,Sector,Status\n1,A,B,C,Approved\n1,D,E,F,Rejected\n";

        let err = CsvRecordSource::from_string(csv)
            .load()
            .expect_err("duplicate ids rejected");

        assert!(matches!(err, SourceError::DuplicateId(id) if id.as_str() == "1"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = CsvRecordSource::from_path("/definitely/not/here.csv")
            .load()
            .expect_err("missing file");
        assert!(matches!(err, SourceError::Import(CsvImportError::Io(_))));
    }
}
