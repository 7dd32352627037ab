use super::normalizer::normalize_text;
use crate::workflows::funder::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, Priority, Score,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// A row that could not be turned into a record.
#[derive(Debug)]
pub(crate) enum RowError {
    Csv(csv::Error),
    InvalidScore { line: u64, value: String },
}

impl From<csv::Error> for RowError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for raw in csv_reader.records() {
        let raw = raw?;
        let line = raw.position().map(|position| position.line()).unwrap_or_default();
        let row: ApplicationRow = raw.deserialize(Some(&headers))?;
        records.push(row.into_record(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Company Name")]
    company_name: String,
    #[serde(rename = "Grant Title")]
    grant_title: String,
    #[serde(rename = "Sector")]
    sector: String,
    #[serde(rename = "Stage", default)]
    stage: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Employees", default)]
    employees: String,
    #[serde(rename = "Amount", default)]
    amount: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Priority", default)]
    priority: String,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
    #[serde(rename = "Submitted Date", default)]
    submitted_date: String,
    #[serde(rename = "Last Activity", default)]
    last_activity: String,
    #[serde(rename = "Reviewer", default, deserialize_with = "empty_string_as_none")]
    reviewer: Option<String>,
    #[serde(rename = "Documents", default, deserialize_with = "empty_string_as_none")]
    documents: Option<String>,
    #[serde(
        rename = "Chat Messages",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    chat_messages: Option<String>,
}

impl ApplicationRow {
    fn into_record(self, line: u64) -> Result<ApplicationRecord, RowError> {
        let score = parse_score(self.score.as_deref(), line)?;
        Ok(ApplicationRecord {
            id: ApplicationId(normalize_text(&self.id)),
            company_name: normalize_text(&self.company_name),
            grant_title: normalize_text(&self.grant_title),
            sector: normalize_text(&self.sector),
            stage: normalize_text(&self.stage),
            location: normalize_text(&self.location),
            employees: normalize_text(&self.employees),
            amount: normalize_text(&self.amount),
            status: ApplicationStatus::from(normalize_text(&self.status)),
            priority: Priority::from(normalize_text(&self.priority)),
            score,
            submitted_date: normalize_text(&self.submitted_date),
            last_activity: normalize_text(&self.last_activity),
            reviewer: self.reviewer.as_deref().map(normalize_text),
            documents: parse_counter(self.documents.as_deref()),
            chat_messages: parse_counter(self.chat_messages.as_deref()),
        })
    }
}

/// Empty cells mean "not scored"; anything else must be an integer in 0..=100.
fn parse_score(raw: Option<&str>, line: u64) -> Result<Score, RowError> {
    let Some(raw) = raw else {
        return Ok(Score::UNSCORED);
    };
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|value| Score::new(value).ok())
        .ok_or_else(|| RowError::InvalidScore {
            line,
            value: raw.to_string(),
        })
}

/// Display-only counters; unreadable cells count as zero.
fn parse_counter(value: Option<&str>) -> u32 {
    value
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
