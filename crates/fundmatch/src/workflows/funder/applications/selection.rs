use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::ApplicationId;

/// Ids checked for a bulk action, in the order they were checked.
///
/// Select-all is scoped to the visible page: it never merges with ids selected
/// on another page. Equality ignores order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ApplicationId>", into = "Vec<ApplicationId>")]
pub struct SelectionSet {
    ids: Vec<ApplicationId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ApplicationId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            if !selection.is_selected(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Flips one id. Ids outside the visible page are accepted as-is.
    pub fn toggle(&mut self, id: ApplicationId) {
        match self.ids.iter().position(|selected| *selected == id) {
            Some(index) => {
                self.ids.remove(index);
            }
            None => self.ids.push(id),
        }
    }

    /// Clears the selection when it already equals `visible`, otherwise selects
    /// exactly `visible`.
    pub fn toggle_all(&mut self, visible: &[ApplicationId]) {
        if self.same_members(visible) {
            self.clear();
        } else {
            *self = Self::from_ids(visible.iter().cloned());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that are no longer on the visible page.
    pub fn retain_visible(&mut self, visible: &[ApplicationId]) {
        let visible: HashSet<&ApplicationId> = visible.iter().collect();
        self.ids.retain(|id| visible.contains(id));
    }

    pub fn is_selected(&self, id: &ApplicationId) -> bool {
        self.ids.contains(id)
    }

    /// Header checkbox state: every visible row is selected and nothing else.
    pub fn all_selected(&self, visible: &[ApplicationId]) -> bool {
        !visible.is_empty() && self.same_members(visible)
    }

    pub fn ids(&self) -> &[ApplicationId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_ids(self) -> Vec<ApplicationId> {
        self.ids
    }

    fn same_members(&self, other: &[ApplicationId]) -> bool {
        let mine: HashSet<&ApplicationId> = self.ids.iter().collect();
        let theirs: HashSet<&ApplicationId> = other.iter().collect();
        mine == theirs
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.same_members(&other.ids)
    }
}

impl Eq for SelectionSet {}

impl From<Vec<ApplicationId>> for SelectionSet {
    fn from(value: Vec<ApplicationId>) -> Self {
        Self::from_ids(value)
    }
}

impl From<SelectionSet> for Vec<ApplicationId> {
    fn from(value: SelectionSet) -> Self {
        value.ids
    }
}
