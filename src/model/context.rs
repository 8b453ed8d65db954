use crate::model::link::ResourceLink;
use crate::model::people::{LaunchCourse, LaunchUser};
use crate::model::tool::ToolConfiguration;
use chrono::{DateTime, Utc};

/// Per-launch inputs that are not part of any stored record.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub return_url: Option<String>,
    pub locale: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub nonce: String,
    pub launch_id: String,
}

impl LaunchOptions {
    pub fn new(issued_at: DateTime<Utc>, nonce: impl Into<String>) -> Self {
        let nonce = nonce.into();
        Self {
            return_url: None,
            locale: None,
            issued_at,
            launch_id: nonce.clone(),
            nonce,
        }
    }

    /// Fresh clock reading and random nonce, for callers at the delivery edge.
    pub fn generate() -> Self {
        let mut options = Self::new(Utc::now(), uuid::Uuid::new_v4().simple().to_string());
        options.launch_id = uuid::Uuid::new_v4().simple().to_string();
        options
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_launch_id(mut self, launch_id: impl Into<String>) -> Self {
        self.launch_id = launch_id.into();
        self
    }
}

/// Everything a resolver chain may read for one launch.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub course: LaunchCourse,
    pub user: LaunchUser,
    pub link: ResourceLink,
    pub tool: ToolConfiguration,
    pub options: LaunchOptions,
}

impl LaunchContext {
    pub fn new(
        course: LaunchCourse,
        user: LaunchUser,
        link: ResourceLink,
        tool: ToolConfiguration,
        options: LaunchOptions,
    ) -> Self {
        Self {
            course,
            user,
            link,
            tool,
            options,
        }
    }
}
