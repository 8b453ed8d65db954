use crate::constants::consumer;
use crate::errors::LaunchError;
use crate::model::{ParameterMap, ToolConfiguration};
use crate::resolvers::ParameterResolver;
use crate::services::site_config::SiteConfig;
use crate::utils::text::html_to_text;

/// Protocol version, message type and platform metadata.
pub struct ToolConsumerResolver<'a> {
    tool: &'a ToolConfiguration,
    site: &'a SiteConfig,
    message_type: &'a str,
}

impl<'a> ToolConsumerResolver<'a> {
    pub fn new(tool: &'a ToolConfiguration, site: &'a SiteConfig, message_type: &'a str) -> Self {
        Self {
            tool,
            site,
            message_type,
        }
    }
}

impl ParameterResolver for ToolConsumerResolver<'_> {
    fn name(&self) -> &'static str {
        "tool_consumer"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        params.insert("lti_version", self.tool.version.as_str());
        params.insert("lti_message_type", self.message_type);
        params.insert("ext_lms", consumer::EXT_LMS);
        params.insert(
            "tool_consumer_info_product_family_code",
            &self.site.product_family_code,
        );
        params.insert("tool_consumer_info_version", &self.site.platform_version);
        if let Some(guid) = self.site.instance_guid.as_deref() {
            params.insert_non_empty("tool_consumer_instance_guid", guid);
        }
        params.insert(
            "tool_consumer_instance_name",
            html_to_text(self.site.consumer_instance_name()),
        );
        params.insert(
            "tool_consumer_instance_description",
            html_to_text(&self.site.site_fullname),
        );
        if let Some(email) = self.site.contact_email.as_deref() {
            params.insert_non_empty("tool_consumer_instance_contact_email", email);
        }
        params.insert("tool_consumer_instance_url", &self.site.wwwroot);
        if !self.tool.is_lti13() {
            params.insert("oauth_callback", consumer::OAUTH_CALLBACK);
        }
        Ok(params)
    }
}
