//! Curriculum page view model.

use serde_json::json;

use crate::domain::course::{Course, Level};
use crate::domain::presenters::ViewModel;

/// Builds the props for the course curriculum page.
pub struct CurriculumPresenter;

impl CurriculumPresenter {
    /// Build the view model from the scoped course and its levels.
    pub fn build(course: &Course, levels: &[Level]) -> ViewModel {
        let level_props: Vec<_> = levels
            .iter()
            .map(|level| {
                json!({
                    "id": level.id().as_ref(),
                    "number": level.number(),
                    "name": level.name(),
                })
            })
            .collect();

        let props = json!({
            "courseId": course.id().as_ref(),
            "courseName": course.name(),
            "publicPreview": course.public_preview(),
            "levels": level_props,
        });

        ViewModel::new(props, format!("{} | Curriculum", course.name()))
    }
}
