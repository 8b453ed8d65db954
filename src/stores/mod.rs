pub mod fixture_store;
pub mod memory_store;

use crate::errors::LaunchError;
use crate::model::{LaunchCourse, LaunchUser, ResourceLink, ToolConfiguration};
use crate::services::launch_services::LaunchServicePlugin;
use std::sync::Arc;

pub use fixture_store::{FixtureFile, FixtureStore};
pub use memory_store::MemoryLaunchStore;

pub trait ToolConfigurationProvider: Send + Sync {
    fn tool(&self, id: &str) -> Result<Option<ToolConfiguration>, LaunchError>;
}

pub trait ResourceLinkStore: Send + Sync {
    fn link(&self, id: &str) -> Result<Option<ResourceLink>, LaunchError>;
}

pub trait UserCourseProvider: Send + Sync {
    fn user(&self, id: &str) -> Result<Option<LaunchUser>, LaunchError>;
    fn course(&self, id: &str) -> Result<Option<LaunchCourse>, LaunchError>;
}

/// Service plugins enabled for a tool, in consultation order.
pub trait ServicePluginRegistry: Send + Sync {
    fn plugins(
        &self,
        tool: &ToolConfiguration,
    ) -> Result<Vec<Arc<dyn LaunchServicePlugin>>, LaunchError>;
}
