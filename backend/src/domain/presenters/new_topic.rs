//! New-topic page view model.

use serde_json::json;

use crate::domain::community::{Community, TopicTarget};
use crate::domain::messages;
use crate::domain::presenters::ViewModel;

/// Builds the props for the community new-topic page.
pub struct NewTopicPresenter;

impl NewTopicPresenter {
    /// Build the view model from the community and an optional target.
    ///
    /// The `target` key is left out entirely when no target was supplied, so
    /// the serialised contract stays minimal.
    pub fn build(community: &Community, target: Option<&TopicTarget>) -> ViewModel {
        let categories: Vec<_> = community
            .topic_categories()
            .iter()
            .map(|category| {
                json!({
                    "id": category.id().as_ref(),
                    "name": category.name(),
                })
            })
            .collect();

        let mut props = json!({
            "communityId": community.id().as_ref(),
            "topicCategories": categories,
        });
        if let (Some(target), Some(map)) = (target, props.as_object_mut()) {
            map.insert(
                "target".to_owned(),
                json!({
                    "id": target.id().as_ref(),
                    "title": target.title(),
                }),
            );
        }

        let page_title = format!(
            "{} | {} {}",
            messages::NEW_TOPIC,
            community.name(),
            messages::COMMUNITY
        );
        ViewModel::new(props, page_title)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::community::TopicCategory;
    use crate::domain::ids::{CommunityId, SchoolId, TargetId, TopicCategoryId};

    fn community() -> Community {
        Community::new(
            CommunityId::random(),
            SchoolId::random(),
            "Founders",
            vec![TopicCategory::new(TopicCategoryId::random(), "General")],
        )
    }

    #[test]
    fn absent_target_is_omitted_not_null() {
        let view = NewTopicPresenter::build(&community(), None);
        assert!(view.props().get("target").is_none());
        assert_eq!(
            view.page_title(),
            "Create a new topic | Founders Community"
        );
    }

    #[test]
    fn present_target_is_reduced_to_id_and_title() {
        let target = TopicTarget::new(TargetId::random(), "Interview a customer");
        let view = NewTopicPresenter::build(&community(), Some(&target));
        assert_eq!(
            view.props()["target"]["title"],
            "Interview a customer"
        );
        assert!(view.props()["target"].get("kind").is_none());
    }
}
