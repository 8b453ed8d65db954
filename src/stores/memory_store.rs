use crate::errors::LaunchError;
use crate::model::{LaunchCourse, LaunchUser, ResourceLink, ToolConfiguration};
use crate::services::launch_services::LaunchServicePlugin;
use crate::stores::{
    ResourceLinkStore, ServicePluginRegistry, ToolConfigurationProvider, UserCourseProvider,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

#[derive(Default)]
struct Records {
    tools: HashMap<String, ToolConfiguration>,
    links: HashMap<String, ResourceLink>,
    users: HashMap<String, LaunchUser>,
    courses: HashMap<String, LaunchCourse>,
    plugins: Vec<Arc<dyn LaunchServicePlugin>>,
}

/// In-process record store backing every provider trait. Cheap to clone;
/// clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryLaunchStore {
    records: Arc<RwLock<Records>>,
}

impl std::fmt::Debug for MemoryLaunchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLaunchStore").finish_non_exhaustive()
    }
}

impl MemoryLaunchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, LaunchError> {
        self.records
            .read()
            .map_err(|_| LaunchError::internal("Launch store lock poisoned"))
    }

    fn write(&self, apply: impl FnOnce(&mut Records)) {
        let mut guard = self
            .records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut guard);
    }

    pub fn insert_tool(&self, tool: ToolConfiguration) {
        self.write(|records| {
            records.tools.insert(tool.id.clone(), tool);
        });
    }

    pub fn insert_link(&self, link: ResourceLink) {
        self.write(|records| {
            records.links.insert(link.id.clone(), link);
        });
    }

    pub fn insert_user(&self, user: LaunchUser) {
        self.write(|records| {
            records.users.insert(user.id.clone(), user);
        });
    }

    pub fn insert_course(&self, course: LaunchCourse) {
        self.write(|records| {
            records.courses.insert(course.id.clone(), course);
        });
    }

    pub fn register_plugin(&self, plugin: Arc<dyn LaunchServicePlugin>) {
        self.write(|records| records.plugins.push(plugin));
    }

    pub fn counts(&self) -> Result<serde_json::Value, LaunchError> {
        let records = self.read()?;
        Ok(serde_json::json!({
            "tools": records.tools.len(),
            "links": records.links.len(),
            "users": records.users.len(),
            "courses": records.courses.len(),
            "plugins": records.plugins.len(),
        }))
    }
}

impl ToolConfigurationProvider for MemoryLaunchStore {
    fn tool(&self, id: &str) -> Result<Option<ToolConfiguration>, LaunchError> {
        Ok(self.read()?.tools.get(id).cloned())
    }
}

impl ResourceLinkStore for MemoryLaunchStore {
    fn link(&self, id: &str) -> Result<Option<ResourceLink>, LaunchError> {
        Ok(self.read()?.links.get(id).cloned())
    }
}

impl UserCourseProvider for MemoryLaunchStore {
    fn user(&self, id: &str) -> Result<Option<LaunchUser>, LaunchError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    fn course(&self, id: &str) -> Result<Option<LaunchCourse>, LaunchError> {
        Ok(self.read()?.courses.get(id).cloned())
    }
}

impl ServicePluginRegistry for MemoryLaunchStore {
    fn plugins(
        &self,
        _tool: &ToolConfiguration,
    ) -> Result<Vec<Arc<dyn LaunchServicePlugin>>, LaunchError> {
        Ok(self.read()?.plugins.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::launch_services::ConfiguredServicePlugin;

    #[test]
    fn clones_share_records() {
        let store = MemoryLaunchStore::new();
        let view = store.clone();
        store.insert_tool(ToolConfiguration::new("4", "https://tool.test"));
        store.insert_course(LaunchCourse::new("2"));
        store.register_plugin(Arc::new(ConfiguredServicePlugin::new("gradebook")));
        assert_eq!(view.tool("4").unwrap().unwrap().base_url, "https://tool.test");
        assert!(view.course("2").unwrap().is_some());
        assert!(view.user("3").unwrap().is_none());
        let tool = view.tool("4").unwrap().unwrap();
        assert_eq!(view.plugins(&tool).unwrap().len(), 1);
        assert_eq!(view.counts().unwrap()["plugins"], 1);
    }

    #[test]
    fn poisoned_store_fails_plugin_lookup() {
        let store = MemoryLaunchStore::new();
        store.register_plugin(Arc::new(ConfiguredServicePlugin::new("gradebook")));
        let records = Arc::clone(&store.records);
        let _ = std::thread::spawn(move || {
            let _guard = records.write().unwrap();
            panic!("writer died");
        })
        .join();
        let tool = ToolConfiguration::new("4", "https://tool.test");
        let err = store.plugins(&tool).err().unwrap();
        assert_eq!(err.code, "INTERNAL");
        assert!(store.tool("4").is_err());
    }
}
