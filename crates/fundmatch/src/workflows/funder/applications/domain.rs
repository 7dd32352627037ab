use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted funding applications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review status of an application as shown on the funder dashboard.
///
/// Labels outside the known set are kept verbatim so that a record from a newer
/// backend still sorts and renders; such records never match a status filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    PendingReview,
    UnderReview,
    Approved,
    Rejected,
    Unrecognized(String),
}

impl ApplicationStatus {
    pub fn recognized() -> [Self; 4] {
        [
            Self::PendingReview,
            Self::UnderReview,
            Self::Approved,
            Self::Rejected,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::PendingReview => "Pending Review",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Exact, case-sensitive lookup of a known label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::recognized()
            .into_iter()
            .find(|status| status.label() == label)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::PendingReview | Self::UnderReview => BadgeTone::Info,
            Self::Approved => BadgeTone::Success,
            Self::Rejected => BadgeTone::Danger,
            Self::Unrecognized(_) => BadgeTone::Neutral,
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value).unwrap_or(Self::Unrecognized(value))
    }
}

impl From<&str> for ApplicationStatus {
    fn from(value: &str) -> Self {
        Self::from_label(value).unwrap_or_else(|| Self::Unrecognized(value.to_string()))
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        match value {
            ApplicationStatus::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reviewer-assigned priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Unrecognized(String),
}

impl Priority {
    pub fn label(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::High => BadgeTone::Danger,
            Self::Medium => BadgeTone::Warning,
            Self::Low => BadgeTone::Success,
            Self::Unrecognized(_) => BadgeTone::Neutral,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour family the rendering layer uses for status and priority badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Info,
    Success,
    Warning,
    Danger,
    Neutral,
}

/// Reviewer score in `0..=100`. Zero means the application has not been scored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;
    pub const UNSCORED: Self = Self(0);

    pub fn new(value: u8) -> Result<Self, ScoreOutOfRange> {
        if value > Self::MAX {
            return Err(ScoreOutOfRange(value.into()));
        }
        Ok(Self(value))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_scored(self) -> bool {
        self.0 > 0
    }

    pub fn display(self) -> String {
        if self.is_scored() {
            format!("{}%", self.0)
        } else {
            "Not scored".to_string()
        }
    }
}

impl TryFrom<u8> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {0} is outside 0..=100")]
pub struct ScoreOutOfRange(pub u32);

/// One funding application submitted by an applicant against a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub company_name: String,
    pub grant_title: String,
    pub sector: String,
    pub stage: String,
    pub location: String,
    pub employees: String,
    pub amount: String,
    pub status: ApplicationStatus,
    pub priority: Priority,
    pub score: Score,
    pub submitted_date: String,
    pub last_activity: String,
    #[serde(default)]
    pub reviewer: Option<String>,
    #[serde(default)]
    pub documents: u32,
    #[serde(default)]
    pub chat_messages: u32,
}

/// Requested amount reduced to its significant digits. Ordering is numeric
/// for any number of digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

impl ApplicationRecord {
    pub fn amount_value(&self) -> Option<Amount> {
        parse_amount(&self.amount)
    }

    pub fn submitted_at(&self) -> Option<i64> {
        parse_timestamp_millis(&self.submitted_date)
    }

    pub fn last_activity_at(&self) -> Option<i64> {
        parse_timestamp_millis(&self.last_activity)
    }
}

/// Numeric value of a currency string: every non-digit is dropped, so
/// `$250,000` reads as `250000`. `None` when no digit is left.
pub fn parse_amount(raw: &str) -> Option<Amount> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        Some(Amount("0".to_string()))
    } else {
        Some(Amount(significant.to_string()))
    }
}

/// Epoch milliseconds for an ISO 8601 timestamp. Values without an offset
/// are read as UTC and a bare `YYYY-MM-DD` date is midnight UTC.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
