use crate::errors::LaunchError;
use crate::model::ParameterMap;
use crate::services::logger::Logger;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a service plugin is told about the launch being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLaunchRequest {
    pub message_type: String,
    pub course_id: String,
    pub user_id: String,
    pub tool_id: String,
    pub link_id: String,
}

/// An optional service that can influence launch content.
///
/// Every hook has a no-op default so a plugin only implements what it needs.
pub trait LaunchServicePlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Returns a replacement for `current`, or `None` to keep it.
    fn override_target_link_uri(
        &self,
        _request: &ServiceLaunchRequest,
        _current: &str,
    ) -> Result<Option<String>, LaunchError> {
        Ok(None)
    }

    fn get_launch_params(
        &self,
        _request: &ServiceLaunchRequest,
    ) -> Result<ParameterMap, LaunchError> {
        Ok(ParameterMap::new())
    }

    /// Returns `value` unchanged when the plugin does not recognise it.
    fn parse_value(&self, value: &str) -> Result<String, LaunchError> {
        Ok(value.to_string())
    }
}

/// The view resolvers and the substitution engine have of the service plugins.
pub trait LaunchServiceFacade {
    fn get_target_link_uri(&self) -> Result<String, LaunchError>;
    fn get_launch_parameters(&self) -> Result<ParameterMap, LaunchError>;
    fn parse_custom_param_value(&self, value: &str) -> Result<String, LaunchError>;
}

/// Facade over an ordered plugin list for a single launch.
pub struct PluginServiceFacade {
    logger: Logger,
    plugins: Vec<Arc<dyn LaunchServicePlugin>>,
    request: ServiceLaunchRequest,
    default_target: String,
}

impl PluginServiceFacade {
    pub fn new(
        logger: Logger,
        plugins: Vec<Arc<dyn LaunchServicePlugin>>,
        request: ServiceLaunchRequest,
        default_target: impl Into<String>,
    ) -> Self {
        Self {
            logger: logger.child("services"),
            plugins,
            request,
            default_target: default_target.into(),
        }
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins
            .iter()
            .map(|plugin| plugin.name().to_string())
            .collect()
    }
}

impl LaunchServiceFacade for PluginServiceFacade {
    fn get_target_link_uri(&self) -> Result<String, LaunchError> {
        let mut target = self.default_target.clone();
        for plugin in &self.plugins {
            if let Some(next) = plugin.override_target_link_uri(&self.request, &target)? {
                self.logger.debug(
                    "Target link URI overridden",
                    Some(&serde_json::json!({ "service": plugin.name() })),
                );
                target = next;
            }
        }
        Ok(target)
    }

    fn get_launch_parameters(&self) -> Result<ParameterMap, LaunchError> {
        let mut params = ParameterMap::new();
        for plugin in &self.plugins {
            let contributed = plugin.get_launch_params(&self.request)?;
            if !contributed.is_empty() {
                self.logger.debug(
                    "Service contributed launch parameters",
                    Some(&serde_json::json!({
                        "service": plugin.name(),
                        "keys": contributed.keys().collect::<Vec<_>>(),
                    })),
                );
            }
            params.merge(contributed);
        }
        Ok(params)
    }

    fn parse_custom_param_value(&self, value: &str) -> Result<String, LaunchError> {
        for plugin in &self.plugins {
            let parsed = plugin.parse_value(value)?;
            if parsed != value {
                return Ok(parsed);
            }
        }
        Ok(value.to_string())
    }
}

/// A data-driven plugin: fixed substitutions, fixed launch parameters and an
/// optional target URI. `{course_id}`, `{user_id}`, `{tool_id}` and `{link_id}`
/// placeholders are expanded in parameter values and the target URI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguredServicePlugin {
    pub name: String,
    #[serde(default)]
    pub substitutions: IndexMap<String, String>,
    #[serde(default)]
    pub launch_parameters: IndexMap<String, String>,
    #[serde(default)]
    pub target_link_uri: Option<String>,
}

impl ConfiguredServicePlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_substitution(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(name.into(), value.into());
        self
    }

    pub fn with_launch_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.launch_parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_target_link_uri(mut self, uri: impl Into<String>) -> Self {
        self.target_link_uri = Some(uri.into());
        self
    }

    fn expand(template: &str, request: &ServiceLaunchRequest) -> String {
        template
            .replace("{course_id}", &request.course_id)
            .replace("{user_id}", &request.user_id)
            .replace("{tool_id}", &request.tool_id)
            .replace("{link_id}", &request.link_id)
    }
}

impl LaunchServicePlugin for ConfiguredServicePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn override_target_link_uri(
        &self,
        request: &ServiceLaunchRequest,
        _current: &str,
    ) -> Result<Option<String>, LaunchError> {
        Ok(self
            .target_link_uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .map(|uri| Self::expand(uri, request)))
    }

    fn get_launch_params(
        &self,
        request: &ServiceLaunchRequest,
    ) -> Result<ParameterMap, LaunchError> {
        Ok(self
            .launch_parameters
            .iter()
            .map(|(key, value)| (key.clone(), Self::expand(value, request)))
            .collect())
    }

    fn parse_value(&self, value: &str) -> Result<String, LaunchError> {
        let Some(name) = value.strip_prefix('$') else {
            return Ok(value.to_string());
        };
        Ok(self
            .substitutions
            .get(name)
            .cloned()
            .unwrap_or_else(|| value.to_string()))
    }
}
