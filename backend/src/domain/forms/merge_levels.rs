//! Level-merge mutator.
//!
//! Merging re-parents everything from one level onto another and deletes the
//! emptied level. Validation must catch a self-merge before anything
//! destructive can run.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::actor::Actor;
use crate::domain::course::Level;
use crate::domain::error::Error;
use crate::domain::forms::FormState;
use crate::domain::ids::{LevelId, SchoolId};
use crate::domain::ports::{LevelRepository, LevelRepositoryError};

/// Request payload for the merge-levels mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeLevelsPayload {
    pub delete_level_id: String,
    pub merge_into_level_id: String,
}

/// Validates and performs the merge of one level into another.
pub struct MergeLevelsForm {
    actor: Actor,
    current_school: SchoolId,
    levels: Arc<dyn LevelRepository>,
    state: FormState,
    errors: Vec<String>,
    validated: Option<(Level, Level)>,
}

impl MergeLevelsForm {
    /// Bind the mutator to the requesting actor and the level store.
    pub fn new(actor: Actor, current_school: SchoolId, levels: Arc<dyn LevelRepository>) -> Self {
        Self {
            actor,
            current_school,
            levels,
            state: FormState::Unvalidated,
            errors: Vec::new(),
            validated: None,
        }
    }

    /// Validate the payload without performing any write.
    pub async fn validate(&mut self, payload: &MergeLevelsPayload) -> Result<bool, Error> {
        let mut errors = Vec::new();

        if !self.actor.is_school_admin_of(&self.current_school) {
            errors.push("you are not allowed to merge levels in this school".to_owned());
        }

        // The self-merge check runs on the raw ids so it cannot be masked by
        // a lookup failure.
        if payload.delete_level_id == payload.merge_into_level_id {
            errors.push("a level cannot be merged into itself".to_owned());
        }

        let delete = self
            .resolve_level(&payload.delete_level_id, &mut errors)
            .await?;
        let merge_into = self
            .resolve_level(&payload.merge_into_level_id, &mut errors)
            .await?;

        if let (Some(delete), Some(merge_into)) = (&delete, &merge_into)
            && delete.course_id() != merge_into.course_id()
        {
            errors.push("levels must belong to the same course".to_owned());
        }

        if let (Some(delete), Some(merge_into), true) = (delete, merge_into, errors.is_empty()) {
            self.validated = Some((delete, merge_into));
            self.state = FormState::Valid;
            Ok(true)
        } else {
            self.errors = errors;
            self.state = FormState::Invalid;
            Ok(false)
        }
    }

    async fn resolve_level(
        &self,
        raw_id: &str,
        errors: &mut Vec<String>,
    ) -> Result<Option<Level>, Error> {
        let Ok(id) = LevelId::new(raw_id) else {
            errors.push("level not found".to_owned());
            return Ok(None);
        };
        match self.levels.find_in_school(&id, &self.current_school).await {
            Ok(level) => Ok(Some(level)),
            Err(LevelRepositoryError::NotFound) => {
                errors.push("level not found".to_owned());
                Ok(None)
            }
            Err(err) => Err(map_level_error(err)),
        }
    }

    /// Ordered validation messages collected by [`Self::validate`].
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Perform the merge.
    ///
    /// Fails fast unless [`Self::validate`] has returned true; callable at
    /// most once.
    pub async fn merge_levels(&mut self) -> Result<(), Error> {
        self.state.require_valid()?;
        let Some((delete, merge_into)) = self.validated.take() else {
            return Err(Error::internal("validated payload missing"));
        };
        self.state = FormState::Actioned;

        self.levels
            .merge(delete.id(), merge_into.id())
            .await
            .map_err(map_level_error)?;

        info!(
            deleted = %delete.id(),
            merged_into = %merge_into.id(),
            "levels merged"
        );
        Ok(())
    }
}

fn map_level_error(err: LevelRepositoryError) -> Error {
    match err {
        LevelRepositoryError::NotFound => Error::not_found("level not found"),
        LevelRepositoryError::Unavailable { message } => {
            Error::internal(format!("level storage failed: {message}"))
        }
    }
}
