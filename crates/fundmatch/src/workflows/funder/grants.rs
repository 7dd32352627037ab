use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    Open,
    Closed,
    Upcoming,
}

impl GrantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Upcoming => "Upcoming",
        }
    }
}

/// A funding opportunity published by the funder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSummary {
    pub grant_id: String,
    pub title: String,
    pub issuer: String,
    pub country: String,
    pub status: GrantStatus,
    pub deadline: NaiveDate,
    pub amount_min: u64,
    pub amount_max: u64,
    pub sector_tags: Vec<String>,
    pub applications: u32,
    pub allocated: u64,
}

impl GrantSummary {
    /// Share of the maximum award already allocated, in percent. Zero when the
    /// grant has no maximum.
    pub fn allocation_percentage(&self) -> f64 {
        if self.amount_max == 0 {
            return 0.0;
        }
        self.allocated as f64 / self.amount_max as f64 * 100.0
    }

    pub fn view(&self) -> GrantView {
        GrantView {
            summary: self.clone(),
            status_label: self.status.label(),
            allocation_percentage: self.allocation_percentage().round() as u32,
        }
    }
}

/// Grant card payload for the dashboard overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantView {
    #[serde(flatten)]
    pub summary: GrantSummary,
    pub status_label: &'static str,
    pub allocation_percentage: u32,
}

/// Read-only list of the funder's grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantPortfolio {
    grants: Vec<GrantSummary>,
}

impl GrantPortfolio {
    pub fn new(grants: Vec<GrantSummary>) -> Self {
        Self { grants }
    }

    pub fn all(&self) -> &[GrantSummary] {
        &self.grants
    }

    /// Grants currently accepting applications.
    pub fn active(&self) -> Vec<&GrantSummary> {
        self.grants
            .iter()
            .filter(|grant| grant.status == GrantStatus::Open)
            .collect()
    }

    pub fn find(&self, grant_id: &str) -> Option<&GrantSummary> {
        self.grants.iter().find(|grant| grant.grant_id == grant_id)
    }

    pub fn total_allocated(&self) -> u64 {
        self.grants.iter().map(|grant| grant.allocated).sum()
    }
}
