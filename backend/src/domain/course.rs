//! Course and level data model.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{CourseId, LevelId, SchoolId};

/// A course offered by a school.
///
/// `public_preview` controls whether anonymous visitors may view the
/// curriculum; every other page requires an authenticated actor inside the
/// course's school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    school_id: SchoolId,
    name: String,
    description: String,
    public_preview: bool,
}

impl Course {
    /// Construct a course.
    pub fn new(
        id: CourseId,
        school_id: SchoolId,
        name: impl Into<String>,
        description: impl Into<String>,
        public_preview: bool,
    ) -> Self {
        Self {
            id,
            school_id,
            name: name.into(),
            description: description.into(),
            public_preview,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    /// School the course belongs to.
    pub fn school_id(&self) -> &SchoolId {
        &self.school_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marketing description shown on the apply page.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether anonymous visitors may view the curriculum.
    pub fn public_preview(&self) -> bool {
        self.public_preview
    }
}

/// One level within a course's curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    id: LevelId,
    course_id: CourseId,
    number: u32,
    name: String,
}

impl Level {
    /// Construct a level.
    pub fn new(id: LevelId, course_id: CourseId, number: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            course_id,
            number,
            name: name.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &LevelId {
        &self.id
    }

    /// Course the level belongs to.
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    /// Ordinal position within the curriculum.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
