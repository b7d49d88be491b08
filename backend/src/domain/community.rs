//! Community data model.
//!
//! Communities host discussion topics. A new topic may optionally link back
//! to an existing record (its target), which the new-topic page surfaces as
//! an `{id, title}` pair.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{CommunityId, SchoolId, TargetId, TopicCategoryId};

/// A discussion community within a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    id: CommunityId,
    school_id: SchoolId,
    name: String,
    topic_categories: Vec<TopicCategory>,
}

impl Community {
    /// Construct a community with its topic categories.
    pub fn new(
        id: CommunityId,
        school_id: SchoolId,
        name: impl Into<String>,
        topic_categories: Vec<TopicCategory>,
    ) -> Self {
        Self {
            id,
            school_id,
            name: name.into(),
            topic_categories,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &CommunityId {
        &self.id
    }

    /// School the community belongs to.
    pub fn school_id(&self) -> &SchoolId {
        &self.school_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Categories a new topic may be filed under.
    pub fn topic_categories(&self) -> &[TopicCategory] {
        &self.topic_categories
    }
}

/// A category topics may be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCategory {
    id: TopicCategoryId,
    name: String,
}

impl TopicCategory {
    /// Construct a category.
    pub fn new(id: TopicCategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &TopicCategoryId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The record a new topic links back to, reduced to what the page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicTarget {
    id: TargetId,
    title: String,
}

impl TopicTarget {
    /// Construct a target reference.
    pub fn new(id: TargetId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &TargetId {
        &self.id
    }

    /// Title shown beside the new-topic editor.
    pub fn title(&self) -> &str {
        &self.title
    }
}
