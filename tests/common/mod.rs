#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use lti_launch::model::{LaunchCourse, LaunchOptions, LaunchUser, ResourceLink, ToolConfiguration};
use lti_launch::services::{ConfiguredServicePlugin, LaunchResult, LaunchService, Logger, SiteConfig};
use lti_launch::stores::MemoryLaunchStore;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const ISSUED_AT: i64 = 1_700_000_000;

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

pub fn temp_path(prefix: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
}

pub fn options() -> LaunchOptions {
    LaunchOptions::new(Utc.timestamp_opt(ISSUED_AT, 0).unwrap(), "nonce-1")
        .with_launch_id("launch-1")
}

/// One course, one user, one tool and one placement of it.
pub struct Fixture {
    pub site: SiteConfig,
    pub tool: ToolConfiguration,
    pub link: ResourceLink,
    pub course: LaunchCourse,
    pub user: LaunchUser,
    pub services: Vec<ConfiguredServicePlugin>,
}

impl Fixture {
    pub fn new() -> Self {
        let site = SiteConfig {
            wwwroot: "https://lms.test".to_string(),
            site_shortname: "LMS".to_string(),
            site_fullname: "Test <b>Learning</b> Platform".to_string(),
            instance_guid: Some("lms.test".to_string()),
            ..SiteConfig::default()
        };

        let mut tool = ToolConfiguration::new("4", "https://tool.test/launch");
        tool.name = "Quiz tool".to_string();

        let mut link = ResourceLink::new("5", "2", "4");
        link.title = "Week 1 quiz".to_string();

        let mut course = LaunchCourse::new("2");
        course.shortname = "BIO101".to_string();
        course.fullname = "Biology".to_string();
        course.idnumber = "BIO-2024".to_string();

        let mut user = LaunchUser::new("3");
        user.username = "ada".to_string();
        user.firstname = "Ada".to_string();
        user.lastname = "Lovelace".to_string();
        user.idnumber = "S-0003".to_string();
        user.email = "ada@example.test".to_string();

        Self {
            site,
            tool,
            link,
            course,
            user,
            services: Vec::new(),
        }
    }

    pub fn store(&self) -> MemoryLaunchStore {
        let store = MemoryLaunchStore::new();
        store.insert_tool(self.tool.clone());
        store.insert_link(self.link.clone());
        store.insert_course(self.course.clone());
        store.insert_user(self.user.clone());
        for service in &self.services {
            store.register_plugin(Arc::new(service.clone()));
        }
        store
    }

    pub fn service(&self) -> LaunchService {
        LaunchService::from_store(Logger::silent("test"), self.site.clone(), self.store())
    }

    pub fn launch(&self) -> LaunchResult {
        self.service()
            .launch_resource_link(&self.link.id, &self.user.id, options())
            .expect("launch should succeed")
    }
}
