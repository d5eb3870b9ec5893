use serde::{Deserialize, Serialize};

/// An external reference attached to a keyframe.
///
/// A link to the book chapter, lecture, or article that supports the
/// keyframe's work. Resources are immutable once constructed; callers are
/// expected to pass a non-empty title and url, but the storage format does
/// not enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl Resource {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
