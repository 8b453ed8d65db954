use crate::claims::{LaunchClaims, PayloadFormatter};
use crate::constants::{message_types, prefixes};
use crate::errors::LaunchError;
use crate::message::Message;
use crate::model::{LaunchContext, LaunchOptions, ParameterMap, ToolConfiguration};
use crate::resolvers::ResourceLinkChain;
use crate::services::launch_services::{
    LaunchServiceFacade, PluginServiceFacade, ServiceLaunchRequest,
};
use crate::services::logger::Logger;
use crate::services::oauth::OAuthSigner;
use crate::services::site_config::SiteConfig;
use crate::stores::{
    MemoryLaunchStore, ResourceLinkStore, ServicePluginRegistry, ToolConfigurationProvider,
    UserCourseProvider,
};
use crate::substitution::{AllowAll, SubstitutionDictionary, SubstitutionPolicy};
use crate::utils::urls::{ensure_url_has_scheme, ensure_url_is_https};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// What a resource-link launch produces.
#[derive(Debug, Clone)]
pub struct LaunchResult {
    /// Ready-to-deliver request: the signed 1.1 launch, or the 1.3 login
    /// initiation request.
    pub message: Message,
    /// The flat parameter map after every resolver ran.
    pub parameters: ParameterMap,
    /// 1.3 claim set; `None` for 1.1 tools.
    pub claims: Option<Map<String, Value>>,
}

impl LaunchResult {
    pub fn custom_parameters(&self) -> ParameterMap {
        custom_subset(&self.parameters)
    }
}

fn custom_subset(params: &ParameterMap) -> ParameterMap {
    params
        .iter()
        .filter(|(key, _)| key.starts_with(prefixes::CUSTOM))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Entry point: loads launch records, runs the resolver chain and packages
/// the result for the tool's protocol version.
pub struct LaunchService {
    logger: Logger,
    site: SiteConfig,
    tools: Arc<dyn ToolConfigurationProvider>,
    links: Arc<dyn ResourceLinkStore>,
    people: Arc<dyn UserCourseProvider>,
    registry: Arc<dyn ServicePluginRegistry>,
    dictionary: SubstitutionDictionary,
    policy: Arc<dyn SubstitutionPolicy>,
}

impl LaunchService {
    pub fn new(
        logger: Logger,
        site: SiteConfig,
        tools: Arc<dyn ToolConfigurationProvider>,
        links: Arc<dyn ResourceLinkStore>,
        people: Arc<dyn UserCourseProvider>,
        registry: Arc<dyn ServicePluginRegistry>,
    ) -> Self {
        Self {
            logger: logger.child("launch"),
            site,
            tools,
            links,
            people,
            registry,
            dictionary: SubstitutionDictionary::standard(),
            policy: Arc::new(AllowAll),
        }
    }

    pub fn from_store(logger: Logger, site: SiteConfig, store: MemoryLaunchStore) -> Self {
        Self::new(
            logger,
            site,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    pub fn with_policy(mut self, policy: Arc<dyn SubstitutionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_dictionary(mut self, dictionary: SubstitutionDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Loads link, tool, course and user. Any missing record fails the launch.
    pub fn load_context(
        &self,
        link_id: &str,
        user_id: &str,
        options: LaunchOptions,
    ) -> Result<LaunchContext, LaunchError> {
        let link = self
            .links
            .link(link_id)?
            .ok_or_else(|| missing("Resource link", link_id))?;
        let tool = self
            .tools
            .tool(&link.tool_id)?
            .ok_or_else(|| missing("Tool", &link.tool_id))?;
        let course = self
            .people
            .course(&link.course_id)?
            .ok_or_else(|| missing("Course", &link.course_id))?;
        let user = self
            .people
            .user(user_id)?
            .ok_or_else(|| missing("User", user_id))?;
        self.logger.debug(
            "Launch records loaded",
            Some(&serde_json::json!({
                "link_id": link.id,
                "tool_id": tool.id,
                "course_id": course.id,
            })),
        );
        Ok(LaunchContext::new(course, user, link, tool, options))
    }

    pub fn launch_resource_link(
        &self,
        link_id: &str,
        user_id: &str,
        options: LaunchOptions,
    ) -> Result<LaunchResult, LaunchError> {
        let context = self.load_context(link_id, user_id, options)?;
        self.launch(&context)
    }

    /// Launches an already assembled context.
    pub fn launch(&self, context: &LaunchContext) -> Result<LaunchResult, LaunchError> {
        validate_tool(context)?;
        let facade = self.facade(context)?;
        let parameters = self.compose(context, &facade)?;
        let endpoint = self.endpoint(context, &facade)?;
        let result = if context.tool.is_lti13() {
            self.package_lti13(context, parameters, endpoint)?
        } else {
            self.package_lti11(context, parameters, endpoint)?
        };
        self.logger.info(
            "Launch composed",
            Some(&serde_json::json!({
                "link_id": context.link.id,
                "tool_id": context.tool.id,
                "lti_version": context.tool.version.as_str(),
                "parameters": result.parameters.len(),
                "message_url": result.message.url(),
            })),
        );
        Ok(result)
    }

    /// The custom parameters a launch of this link would carry.
    pub fn resolve_custom_parameters(
        &self,
        link_id: &str,
        user_id: &str,
        options: LaunchOptions,
    ) -> Result<ParameterMap, LaunchError> {
        let context = self.load_context(link_id, user_id, options)?;
        let facade = self.facade(&context)?;
        let parameters = self.compose(&context, &facade)?;
        Ok(custom_subset(&parameters))
    }

    fn facade(&self, context: &LaunchContext) -> Result<PluginServiceFacade, LaunchError> {
        let request = ServiceLaunchRequest {
            message_type: message_types::BASIC_LAUNCH.to_string(),
            course_id: context.course.id.clone(),
            user_id: context.user.id.clone(),
            tool_id: context.tool.id.clone(),
            link_id: context.link.id.clone(),
        };
        Ok(PluginServiceFacade::new(
            self.logger.clone(),
            self.registry.plugins(&context.tool)?,
            request,
            default_target(context),
        ))
    }

    fn compose(
        &self,
        context: &LaunchContext,
        facade: &PluginServiceFacade,
    ) -> Result<ParameterMap, LaunchError> {
        self.logger.debug(
            "Composing launch parameters",
            Some(&serde_json::json!({ "services": facade.plugin_names() })),
        );
        let chain = ResourceLinkChain {
            context,
            site: &self.site,
            services: facade,
            dictionary: &self.dictionary,
            policy: &*self.policy,
            message_type: message_types::BASIC_LAUNCH,
        };
        chain.builder(self.logger.clone()).build()
    }

    fn endpoint(
        &self,
        context: &LaunchContext,
        facade: &PluginServiceFacade,
    ) -> Result<String, LaunchError> {
        let target = ensure_url_has_scheme(&facade.get_target_link_uri()?);
        if context.tool.force_ssl || self.site.force_ssl {
            return Ok(ensure_url_is_https(&target));
        }
        Ok(target)
    }

    fn package_lti11(
        &self,
        context: &LaunchContext,
        parameters: ParameterMap,
        endpoint: String,
    ) -> Result<LaunchResult, LaunchError> {
        let mut fields = parameters.to_string_map();
        if let Some((key, secret)) = credentials(&context.tool) {
            fields = OAuthSigner::new(key, secret)
                .with_method(context.tool.signature_method)
                .sign(
                    "POST",
                    &endpoint,
                    &fields,
                    &context.options.nonce,
                    context.options.issued_at.timestamp(),
                )?;
            self.logger.debug("Launch signed", None);
        }
        Ok(LaunchResult {
            message: Message::new(endpoint, fields),
            parameters,
            claims: None,
        })
    }

    fn package_lti13(
        &self,
        context: &LaunchContext,
        parameters: ParameterMap,
        endpoint: String,
    ) -> Result<LaunchResult, LaunchError> {
        let tool = &context.tool;
        let client_id = non_blank(tool.client_id.as_deref()).unwrap_or_default();
        let login_url = non_blank(tool.initiate_login_url.as_deref()).unwrap_or_default();
        let deployment_id = tool.deployment_id().to_string();
        let envelope = LaunchClaims {
            issuer: self.site.wwwroot.clone(),
            audience: client_id.to_string(),
            nonce: context.options.nonce.clone(),
            issued_at: context.options.issued_at,
            deployment_id: deployment_id.clone(),
            target_link_uri: endpoint.clone(),
        };
        let claims = envelope.seal(&PayloadFormatter::default(), &parameters);
        let mut login = IndexMap::new();
        login.insert("iss".to_string(), self.site.wwwroot.clone());
        login.insert("target_link_uri".to_string(), endpoint);
        login.insert("login_hint".to_string(), context.user.id.clone());
        login.insert("lti_message_hint".to_string(), context.link.id.clone());
        login.insert("client_id".to_string(), client_id.to_string());
        login.insert("lti_deployment_id".to_string(), deployment_id);
        self.logger.debug(
            "Login initiation prepared",
            Some(&serde_json::json!({ "claims": claims.len() })),
        );
        Ok(LaunchResult {
            message: Message::new(login_url, login),
            parameters,
            claims: Some(claims),
        })
    }
}

fn missing(what: &str, id: &str) -> LaunchError {
    LaunchError::not_found(format!("{} not found: {}", what, id))
        .with_details(serde_json::json!({ "id": id }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn default_target(context: &LaunchContext) -> String {
    context
        .link
        .url_override()
        .unwrap_or(context.tool.base_url.trim())
        .to_string()
}

fn credentials(tool: &ToolConfiguration) -> Option<(&str, &str)> {
    Some((
        non_blank(tool.consumer_key.as_deref())?,
        non_blank(tool.shared_secret.as_deref())?,
    ))
}

/// Boundary checks run before any parameter is composed.
fn validate_tool(context: &LaunchContext) -> Result<(), LaunchError> {
    let tool = &context.tool;
    if default_target(context).is_empty() {
        return Err(LaunchError::invalid_configuration(format!(
            "Tool {} has no launch URL",
            tool.id
        ))
        .with_hint("Set base_url on the tool or url on the resource link."));
    }
    if tool.is_lti13() {
        if non_blank(tool.client_id.as_deref()).is_none() {
            return Err(LaunchError::invalid_configuration(format!(
                "LTI 1.3 tool {} has no client_id",
                tool.id
            )));
        }
        if non_blank(tool.initiate_login_url.as_deref()).is_none() {
            return Err(LaunchError::invalid_configuration(format!(
                "LTI 1.3 tool {} has no initiate_login_url",
                tool.id
            )));
        }
        return Ok(());
    }
    let has_key = non_blank(tool.consumer_key.as_deref()).is_some();
    let has_secret = non_blank(tool.shared_secret.as_deref()).is_some();
    if has_key != has_secret {
        return Err(LaunchError::invalid_configuration(format!(
            "Tool {} must set both consumer_key and shared_secret, or neither",
            tool.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LaunchErrorKind;
    use crate::model::{LaunchCourse, LaunchUser, LtiVersion, ResourceLink};
    use chrono::TimeZone;
    use chrono::Utc;

    fn store(tool: ToolConfiguration) -> MemoryLaunchStore {
        let store = MemoryLaunchStore::new();
        store.insert_tool(tool);
        store.insert_link(ResourceLink::new("5", "2", "4"));
        store.insert_course(LaunchCourse::new("2"));
        store.insert_user(LaunchUser::new("3"));
        store
    }

    fn options() -> LaunchOptions {
        LaunchOptions::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap(), "nonce-1")
    }

    fn service(tool: ToolConfiguration) -> LaunchService {
        LaunchService::from_store(Logger::silent("test"), SiteConfig::default(), store(tool))
    }

    #[test]
    fn missing_user_fails_closed() {
        let service = service(ToolConfiguration::new("4", "https://tool.test"));
        let err = service
            .launch_resource_link("5", "99", options())
            .unwrap_err();
        assert_eq!(err.kind, LaunchErrorKind::NotFound);
        let err = service.launch_resource_link("404", "3", options()).unwrap_err();
        assert_eq!(err.kind, LaunchErrorKind::NotFound);
    }

    #[test]
    fn half_configured_credentials_are_rejected() {
        let mut tool = ToolConfiguration::new("4", "https://tool.test");
        tool.consumer_key = Some("key".to_string());
        let err = service(tool)
            .launch_resource_link("5", "3", options())
            .unwrap_err();
        assert_eq!(err.kind, LaunchErrorKind::InvalidConfiguration);
    }

    #[test]
    fn lti13_requires_client_and_login_url() {
        let mut tool = ToolConfiguration::new("4", "https://tool.test");
        tool.version = LtiVersion::Lti1p3;
        tool.client_id = Some("client".to_string());
        let err = service(tool)
            .launch_resource_link("5", "3", options())
            .unwrap_err();
        assert!(err.message.contains("initiate_login_url"));
    }

    #[test]
    fn unsigned_lti11_launch_uses_schemeless_base_url() {
        let service = service(ToolConfiguration::new("4", "tool.test/launch"));
        let result = service.launch_resource_link("5", "3", options()).unwrap();
        assert_eq!(result.message.url(), "http://tool.test/launch");
        assert!(result.claims.is_none());
        assert!(!result.message.parameters().contains_key("oauth_signature"));
        assert_eq!(
            result.message.parameters().get("resource_link_id").map(String::as_str),
            Some("5")
        );
    }

    #[test]
    fn signed_launch_carries_signature() {
        let mut tool = ToolConfiguration::new("4", "https://tool.test/launch");
        tool.consumer_key = Some("key".to_string());
        tool.shared_secret = Some("secret".to_string());
        let result = service(tool).launch_resource_link("5", "3", options()).unwrap();
        let fields = result.message.parameters();
        assert_eq!(fields["oauth_nonce"], "nonce-1");
        assert_eq!(fields["oauth_timestamp"], "1700000000");
        assert!(OAuthSigner::new("key", "secret")
            .verify("POST", "https://tool.test/launch", fields)
            .unwrap());
    }
}
