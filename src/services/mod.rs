pub mod launch;
pub mod launch_services;
pub mod logger;
pub mod oauth;
pub mod site_config;

pub use launch::{LaunchResult, LaunchService};
pub use launch_services::{
    ConfiguredServicePlugin, LaunchServiceFacade, LaunchServicePlugin, PluginServiceFacade,
    ServiceLaunchRequest,
};
pub use logger::{LogLevel, Logger};
pub use oauth::OAuthSigner;
pub use site_config::{ConfigError, SiteConfig};
