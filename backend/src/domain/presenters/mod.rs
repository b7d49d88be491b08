//! View-model builders.
//!
//! A presenter is a pure function of domain records producing serialisable
//! props plus a page title for the rendering layer. Props never carry live
//! record references, and absent optional inputs are omitted from the map
//! entirely rather than null-filled.

mod curriculum;
mod new_topic;

pub use curriculum::CurriculumPresenter;
pub use new_topic::NewTopicPresenter;

use serde_json::Value;

/// Output of a presenter: props for the page component and its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    props: Value,
    page_title: String,
}

impl ViewModel {
    pub(crate) fn new(props: Value, page_title: impl Into<String>) -> Self {
        Self {
            props,
            page_title: page_title.into(),
        }
    }

    /// Serialisable props handed to the rendering layer.
    pub fn props(&self) -> &Value {
        &self.props
    }

    /// Page title.
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    /// Consume into parts.
    pub fn into_parts(self) -> (Value, String) {
        (self.props, self.page_title)
    }
}
