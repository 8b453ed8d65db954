use crate::constants::consumer;
use crate::errors::LaunchError;
use crate::utils::feature_flags::is_force_ssl_enabled;
use crate::utils::paths::resolve_site_config_path;
use crate::utils::urls::join_url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read site config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse site config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Site config field '{field}' must not be empty")]
    Empty { field: &'static str },
}

impl From<ConfigError> for LaunchError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::Read { .. } | ConfigError::Parse { .. } => {
                "Point LTI_SITE_CONFIG_PATH at a readable JSON file, or unset it to use defaults."
            }
            ConfigError::Empty { .. } => "Set the field in the site config or its LTI_* override.",
        };
        LaunchError::invalid_configuration(err.to_string()).with_hint(hint)
    }
}

/// Platform-wide settings read by the tool-consumer and grading resolvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub wwwroot: String,
    pub site_shortname: String,
    pub site_fullname: String,
    pub institution_name: Option<String>,
    pub instance_guid: Option<String>,
    pub contact_email: Option<String>,
    pub platform_version: String,
    pub product_family_code: String,
    pub locale: String,
    pub force_ssl: bool,
    pub outcome_service_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            wwwroot: "http://localhost".to_string(),
            site_shortname: "lms".to_string(),
            site_fullname: "Learning platform".to_string(),
            institution_name: None,
            instance_guid: None,
            contact_email: None,
            platform_version: "2024100700".to_string(),
            product_family_code: consumer::PRODUCT_FAMILY_CODE.to_string(),
            locale: "en".to_string(),
            force_ssl: false,
            outcome_service_path: "/mod/lti/service.php".to_string(),
        }
    }
}

impl SiteConfig {
    /// Loads from `LTI_SITE_CONFIG_PATH` (or `./lti-site.json`), then applies
    /// environment overrides. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&resolve_site_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str::<SiteConfig>(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            SiteConfig::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(wwwroot) = non_empty_env("LTI_WWWROOT") {
            self.wwwroot = wwwroot;
        }
        if let Some(locale) = non_empty_env("LTI_LOCALE") {
            self.locale = locale;
        }
        if let Some(force_ssl) = is_force_ssl_enabled() {
            self.force_ssl = force_ssl;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wwwroot.trim().is_empty() {
            return Err(ConfigError::Empty { field: "wwwroot" });
        }
        if self.outcome_service_path.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "outcome_service_path",
            });
        }
        Ok(())
    }

    pub fn outcome_service_url(&self) -> String {
        join_url(&self.wwwroot, &self.outcome_service_path)
    }

    /// Institution name shown to tools, falling back to the site short name.
    pub fn consumer_instance_name(&self) -> &str {
        self.institution_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.site_shortname.as_str())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
