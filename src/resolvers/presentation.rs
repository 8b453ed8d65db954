use crate::errors::LaunchError;
use crate::model::{LaunchContainer, LaunchOptions, ParameterMap, ResourceLink, ToolConfiguration};
use crate::resolvers::ParameterResolver;
use crate::services::site_config::SiteConfig;
use crate::utils::urls::ensure_url_is_https;

/// Display target, locale and return URL.
pub struct LaunchPresentationResolver<'a> {
    tool: &'a ToolConfiguration,
    link: &'a ResourceLink,
    site: &'a SiteConfig,
    options: &'a LaunchOptions,
}

impl<'a> LaunchPresentationResolver<'a> {
    pub fn new(
        tool: &'a ToolConfiguration,
        link: &'a ResourceLink,
        site: &'a SiteConfig,
        options: &'a LaunchOptions,
    ) -> Self {
        Self {
            tool,
            link,
            site,
            options,
        }
    }

    /// The link's own choice wins unless it defers to the tool default.
    pub fn launch_container(&self) -> LaunchContainer {
        match self.link.launch_container {
            LaunchContainer::Default => self.tool.launch_container,
            container => container,
        }
    }
}

impl ParameterResolver for LaunchPresentationResolver<'_> {
    fn name(&self) -> &'static str {
        "launch_presentation"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        params.insert(
            "launch_presentation_document_target",
            self.launch_container().document_target(),
        );
        let locale = self
            .options
            .locale
            .as_deref()
            .filter(|locale| !locale.trim().is_empty())
            .unwrap_or(self.site.locale.as_str());
        params.insert("launch_presentation_locale", locale);
        if let Some(return_url) = self.options.return_url.as_deref() {
            params.insert("launch_presentation_return_url", return_url);
        }
        if self.tool.force_ssl || self.site.force_ssl {
            if let Some(url) = params.get_text("launch_presentation_return_url") {
                params.insert("launch_presentation_return_url", ensure_url_is_https(&url));
            }
        }
        Ok(params)
    }
}
