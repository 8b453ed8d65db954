use crate::model::tool::LaunchContainer;
use serde::{Deserialize, Serialize};

/// One placement of a tool inside a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLink {
    pub id: String,
    pub course_id: String,
    pub tool_id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub custom_parameters: String,
    #[serde(default)]
    pub gradable: bool,
    #[serde(default)]
    pub service_salt: Option<String>,
    #[serde(default)]
    pub launch_container: LaunchContainer,
}

impl ResourceLink {
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        tool_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            tool_id: tool_id.into(),
            url: None,
            title: String::new(),
            text: String::new(),
            custom_parameters: String::new(),
            gradable: false,
            service_salt: None,
            launch_container: LaunchContainer::Default,
        }
    }

    pub fn url_override(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn service_salt(&self) -> Option<&str> {
        self.service_salt
            .as_deref()
            .filter(|salt| !salt.trim().is_empty())
    }
}
