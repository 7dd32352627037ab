use std::cmp::Ordering;

use super::super::domain::ApplicationRecord;
use super::super::view_state::{SortDirection, SortKey, SortKind};

/// Stable in-place sort; rows with equal keys keep their input order.
pub(crate) fn sort_records(
    records: &mut [&ApplicationRecord],
    key: SortKey,
    direction: SortDirection,
) {
    records.sort_by(|a, b| compare_records(a, b, key, direction));
}

/// Compares two records on one column.
///
/// Values that cannot be read (an unparseable date, an amount without digits,
/// a missing reviewer) sort after every readable value in both directions and
/// compare equal to each other.
pub fn compare_records(
    a: &ApplicationRecord,
    b: &ApplicationRecord,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    match key.kind() {
        SortKind::Text => directed(text_value(a, key), text_value(b, key), direction),
        SortKind::Currency => directed(a.amount_value(), b.amount_value(), direction),
        SortKind::Numeric => directed(Some(a.score), Some(b.score), direction),
        SortKind::Date => directed(date_value(a, key), date_value(b, key), direction),
    }
}

fn text_value(record: &ApplicationRecord, key: SortKey) -> Option<&str> {
    match key {
        SortKey::CompanyName => Some(record.company_name.as_str()),
        SortKey::GrantTitle => Some(record.grant_title.as_str()),
        SortKey::Sector => Some(record.sector.as_str()),
        SortKey::Stage => Some(record.stage.as_str()),
        SortKey::Location => Some(record.location.as_str()),
        SortKey::Employees => Some(record.employees.as_str()),
        SortKey::Status => Some(record.status.label()),
        SortKey::Priority => Some(record.priority.label()),
        SortKey::Reviewer => record.reviewer.as_deref(),
        SortKey::Amount | SortKey::Score | SortKey::SubmittedDate | SortKey::LastActivity => None,
    }
}

fn date_value(record: &ApplicationRecord, key: SortKey) -> Option<i64> {
    match key {
        SortKey::SubmittedDate => record.submitted_at(),
        SortKey::LastActivity => record.last_activity_at(),
        _ => None,
    }
}

fn directed<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Ascending => a.cmp(&b),
            SortDirection::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
