use crate::model::LaunchContext;
use crate::resolvers::{
    ContextResolver, CustomParametersResolver, KeyNormalizationResolver,
    LaunchPresentationResolver, LisResolver, OutcomeResolver, ParametersBuilder, PrivacyResolver,
    ServiceParametersResolver, SubstitutionScope, ToolConsumerResolver,
};
use crate::services::launch_services::LaunchServiceFacade;
use crate::services::logger::Logger;
use crate::services::site_config::SiteConfig;
use crate::substitution::{SubstitutionDictionary, SubstitutionPolicy};

/// Inputs of the standard resource-link launch chain.
pub struct ResourceLinkChain<'a> {
    pub context: &'a LaunchContext,
    pub site: &'a SiteConfig,
    pub services: &'a dyn LaunchServiceFacade,
    pub dictionary: &'a SubstitutionDictionary,
    pub policy: &'a dyn SubstitutionPolicy,
    pub message_type: &'a str,
}

impl<'a> ResourceLinkChain<'a> {
    /// context, lis, outcome, launch presentation, tool consumer, custom,
    /// service parameters, key normalization, privacy.
    pub fn builder(&self, logger: Logger) -> ParametersBuilder<'a> {
        let ctx = self.context;
        let scope = SubstitutionScope::new(self.dictionary, self.policy, &ctx.user, &ctx.course)
            .with_services(self.services)
            .with_privacy(PrivacyResolver::for_tool(&ctx.tool));
        ParametersBuilder::new(logger)
            .with_resolver(ContextResolver::new(&ctx.course, &ctx.link))
            .with_resolver(LisResolver::new(&ctx.user, &ctx.tool))
            .with_resolver(OutcomeResolver::new(
                &ctx.tool,
                &ctx.link,
                &ctx.user,
                self.site,
                &ctx.options.launch_id,
            ))
            .with_resolver(LaunchPresentationResolver::new(
                &ctx.tool,
                &ctx.link,
                self.site,
                &ctx.options,
            ))
            .with_resolver(ToolConsumerResolver::new(
                &ctx.tool,
                self.site,
                self.message_type,
            ))
            .with_resolver(CustomParametersResolver::new(
                &ctx.tool,
                Some(&ctx.link),
                scope,
            ))
            .with_resolver(ServiceParametersResolver::new(self.services, scope))
            .with_resolver(KeyNormalizationResolver::new(ctx.tool.key_normalization()))
            .with_resolver(PrivacyResolver::for_tool(&ctx.tool))
    }
}
