use crate::errors::LaunchError;
use crate::model::{LaunchCourse, LaunchUser, ResourceLink, ToolConfiguration};
use crate::services::launch_services::ConfiguredServicePlugin;
use crate::stores::memory_store::MemoryLaunchStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// On-disk shape of a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureFile {
    pub tools: Vec<ToolConfiguration>,
    pub links: Vec<ResourceLink>,
    pub users: Vec<LaunchUser>,
    pub courses: Vec<LaunchCourse>,
    pub services: Vec<ConfiguredServicePlugin>,
}

/// Loads a JSON fixture file into a [`MemoryLaunchStore`].
pub struct FixtureStore {
    file_path: PathBuf,
}

impl FixtureStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn load(&self) -> Result<MemoryLaunchStore, LaunchError> {
        let raw = std::fs::read_to_string(&self.file_path).map_err(|err| {
            LaunchError::not_found(format!(
                "Failed to read fixtures {}: {}",
                self.file_path.display(),
                err
            ))
        })?;
        let fixtures: FixtureFile = serde_json::from_str(&raw).map_err(|err| {
            LaunchError::invalid_params(format!(
                "Failed to parse fixtures {}: {}",
                self.file_path.display(),
                err
            ))
            .with_hint("Expected an object with tools, links, users, courses and services arrays.")
        })?;
        Ok(Self::populate(fixtures))
    }

    pub fn populate(fixtures: FixtureFile) -> MemoryLaunchStore {
        let store = MemoryLaunchStore::new();
        for tool in fixtures.tools {
            store.insert_tool(tool);
        }
        for link in fixtures.links {
            store.insert_link(link);
        }
        for user in fixtures.users {
            store.insert_user(user);
        }
        for course in fixtures.courses {
            store.insert_course(course);
        }
        for service in fixtures.services {
            store.register_plugin(Arc::new(service));
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{ResourceLinkStore, ToolConfigurationProvider};
    use crate::errors::LaunchErrorKind;

    #[test]
    fn parses_minimal_fixture_json() {
        let fixtures: FixtureFile = serde_json::from_str(
            r#"{
                "tools": [{"id": "4", "base_url": "https://tool.test", "send_name": "always"}],
                "links": [{"id": "5", "course_id": "2", "tool_id": "4", "launch_container": "window"}]
            }"#,
        )
        .unwrap();
        let store = FixtureStore::populate(fixtures);
        let link = store.link("5").unwrap().unwrap();
        assert_eq!(link.tool_id, "4");
        assert_eq!(link.launch_container.document_target(), "window");
        assert!(store.tool("4").unwrap().is_some());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = FixtureStore::new("/nonexistent/lti-fixtures.json")
            .load()
            .unwrap_err();
        assert_eq!(err.kind, LaunchErrorKind::NotFound);
    }
}
