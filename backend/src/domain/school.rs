//! School data model.
//!
//! A school is the tenant boundary: courses, communities, and users all hang
//! off one school. The applicant tag allow-list lives here because the public
//! enrollment page may only stash tags a school has explicitly defined.

use serde::{Deserialize, Serialize};

use crate::domain::ids::SchoolId;

/// A tenant school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    id: SchoolId,
    name: String,
    founder_tag_list: Vec<String>,
}

impl School {
    /// Construct a school with its applicant tag allow-list.
    pub fn new(id: SchoolId, name: impl Into<String>, founder_tag_list: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            founder_tag_list,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &SchoolId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags a public applicant is allowed to carry into the session.
    pub fn founder_tag_list(&self) -> &[String] {
        &self.founder_tag_list
    }

    /// Whether the given tag is in the school's allow-list.
    pub fn allows_founder_tag(&self, tag: &str) -> bool {
        self.founder_tag_list.iter().any(|known| known == tag)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn tag_allow_list_is_exact_match() {
        let school = School::new(
            SchoolId::random(),
            "Test School",
            vec!["founder".to_owned(), "ms-batch-4".to_owned()],
        );
        assert!(school.allows_founder_tag("ms-batch-4"));
        assert!(!school.allows_founder_tag("MS-BATCH-4"));
        assert!(!school.allows_founder_tag(""));
    }
}
