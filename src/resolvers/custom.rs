use crate::errors::LaunchError;
use crate::model::{LaunchCourse, LaunchUser, ParameterMap, ResourceLink, ToolConfiguration};
use crate::resolvers::{ParameterResolver, PrivacyResolver};
use crate::services::launch_services::LaunchServiceFacade;
use crate::substitution::{
    CustomParameterParser, SubstitutionBindings, SubstitutionDictionary, SubstitutionPolicy,
    SubstitutionResolver,
};

/// Everything substitution needs apart from the flat map itself.
#[derive(Clone, Copy)]
pub struct SubstitutionScope<'a> {
    pub dictionary: &'a SubstitutionDictionary,
    pub policy: &'a dyn SubstitutionPolicy,
    pub bindings: SubstitutionBindings<'a>,
    pub services: Option<&'a dyn LaunchServiceFacade>,
    pub privacy: Option<PrivacyResolver>,
}

impl<'a> SubstitutionScope<'a> {
    pub fn new(
        dictionary: &'a SubstitutionDictionary,
        policy: &'a dyn SubstitutionPolicy,
        user: &'a LaunchUser,
        course: &'a LaunchCourse,
    ) -> Self {
        Self {
            dictionary,
            policy,
            bindings: SubstitutionBindings { user, course },
            services: None,
            privacy: None,
        }
    }

    pub fn with_services(mut self, services: &'a dyn LaunchServiceFacade) -> Self {
        self.services = Some(services);
        self
    }

    /// Withheld personal fields are hidden from substitution as well.
    pub fn with_privacy(mut self, privacy: PrivacyResolver) -> Self {
        self.privacy = Some(privacy);
        self
    }

    /// The part of `params` substitution may read.
    pub fn visible(&self, params: &ParameterMap) -> Result<ParameterMap, LaunchError> {
        match &self.privacy {
            Some(privacy) => privacy.resolve(params.clone()),
            None => Ok(params.clone()),
        }
    }

    /// A resolver reading from `source`.
    pub fn resolver<'s>(&'s self, source: &'s ParameterMap) -> SubstitutionResolver<'s> {
        let resolver = SubstitutionResolver::new(self.dictionary, self.bindings, source)
            .with_policy(self.policy);
        match self.services {
            Some(services) => resolver.with_services(services),
            None => resolver,
        }
    }

    pub fn parser<'s>(&'s self, source: &'s ParameterMap) -> CustomParameterParser<'s> {
        CustomParameterParser::new(self.resolver(source))
    }
}

/// Tool-level then link-level custom parameters; the link wins on a name clash.
///
/// Both sets resolve substitutions against the map as it was when this
/// resolver started, minus any personal fields the tool may not receive.
pub struct CustomParametersResolver<'a> {
    tool: &'a ToolConfiguration,
    link: Option<&'a ResourceLink>,
    scope: SubstitutionScope<'a>,
}

impl<'a> CustomParametersResolver<'a> {
    pub fn new(
        tool: &'a ToolConfiguration,
        link: Option<&'a ResourceLink>,
        scope: SubstitutionScope<'a>,
    ) -> Self {
        Self { tool, link, scope }
    }
}

impl ParameterResolver for CustomParametersResolver<'_> {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        let source = self.scope.visible(&params)?;
        let custom = {
            let parser = self.scope.parser(&source);
            let mut custom = parser.parse(&self.tool.custom_parameters)?;
            if let Some(link) = self.link {
                custom.merge(parser.parse(&link.custom_parameters)?);
            }
            custom
        };
        params.merge(custom);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::AllowAll;

    #[test]
    fn link_parameters_override_tool_parameters() {
        let mut tool = ToolConfiguration::new("4", "https://tool.test");
        tool.custom_parameters = "foo=2\nbar=tool\nuid=$User.id".to_string();
        let mut link = ResourceLink::new("5", "2", "4");
        link.custom_parameters = "foo=1".to_string();
        let user = LaunchUser::new("3");
        let course = LaunchCourse::new("2");
        let dictionary = SubstitutionDictionary::standard();
        let scope = SubstitutionScope::new(&dictionary, &AllowAll, &user, &course);
        let seed: ParameterMap = [("user_id", "3")].into_iter().collect();
        let params = CustomParametersResolver::new(&tool, Some(&link), scope)
            .resolve(seed)
            .unwrap();
        assert_eq!(params.get_text("custom_foo").as_deref(), Some("1"));
        assert_eq!(params.get_text("custom_bar").as_deref(), Some("tool"));
        assert_eq!(params.get_text("custom_uid").as_deref(), Some("3"));
    }

    #[test]
    fn withheld_fields_stay_unresolved() {
        let mut tool = ToolConfiguration::new("4", "https://tool.test");
        tool.custom_parameters =
            "who=$Person.name.full\nsid=$Person.sourcedId\nmail=$Person.email.primary".to_string();
        let user = LaunchUser::new("3");
        let course = LaunchCourse::new("2");
        let dictionary = SubstitutionDictionary::standard();
        let scope = SubstitutionScope::new(&dictionary, &AllowAll, &user, &course)
            .with_privacy(PrivacyResolver::for_tool(&tool));
        let seed: ParameterMap = [
            ("lis_person_name_full", "Ada Lovelace"),
            ("lis_person_sourcedid", "S-0003"),
            ("lis_person_contact_email_primary", "ada@example.test"),
        ]
        .into_iter()
        .collect();
        let params = CustomParametersResolver::new(&tool, None, scope)
            .resolve(seed)
            .unwrap();
        assert_eq!(params.get_text("custom_who").as_deref(), Some("$Person.name.full"));
        assert_eq!(params.get_text("custom_sid").as_deref(), Some("$Person.sourcedId"));
        assert_eq!(
            params.get_text("custom_mail").as_deref(),
            Some("ada@example.test")
        );
        assert_eq!(
            params.get_text("lis_person_name_full").as_deref(),
            Some("Ada Lovelace")
        );
    }
}
