use crate::constants::prefixes::{ESCAPE, SUBSTITUTION};
use crate::errors::LaunchError;
use crate::model::{LaunchCourse, LaunchUser, ParameterMap};
use crate::services::launch_services::LaunchServiceFacade;
use crate::substitution::calculated::calculate;
use crate::substitution::dictionary::{BoundObject, SubstitutionDictionary, SubstitutionSource};
use crate::substitution::policy::{AllowAll, SubstitutionPolicy};
use crate::utils::text::html_to_text;

/// Objects `User.*` and `Course.*` attribute references are read from.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionBindings<'a> {
    pub user: &'a LaunchUser,
    pub course: &'a LaunchCourse,
}

impl SubstitutionBindings<'_> {
    fn attribute(&self, object: BoundObject, field: &str) -> Option<String> {
        match object {
            BoundObject::User => self.user.attribute(field),
            BoundObject::Course => self.course.attribute(field),
        }
    }
}

/// Resolves one `$Name` token (or `\`-escaped literal) to its launch value.
///
/// Resolution never fails for unknown names: the token comes back unchanged.
/// The only error source is a service plugin consulted for names outside the
/// dictionary.
pub struct SubstitutionResolver<'a> {
    dictionary: &'a SubstitutionDictionary,
    bindings: SubstitutionBindings<'a>,
    source: &'a ParameterMap,
    policy: &'a dyn SubstitutionPolicy,
    services: Option<&'a dyn LaunchServiceFacade>,
}

impl<'a> SubstitutionResolver<'a> {
    pub fn new(
        dictionary: &'a SubstitutionDictionary,
        bindings: SubstitutionBindings<'a>,
        source: &'a ParameterMap,
    ) -> Self {
        Self {
            dictionary,
            bindings,
            source,
            policy: &AllowAll,
            services: None,
        }
    }

    pub fn with_policy(mut self, policy: &'a dyn SubstitutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_services(mut self, services: &'a dyn LaunchServiceFacade) -> Self {
        self.services = Some(services);
        self
    }

    pub fn resolve(&self, value: &str) -> Result<String, LaunchError> {
        if let Some(literal) = value.strip_prefix(ESCAPE) {
            return Ok(literal.to_string());
        }
        let Some(name) = value.strip_prefix(SUBSTITUTION) else {
            return Ok(value.to_string());
        };
        if !self.policy.allows(name) {
            return Ok(value.to_string());
        }
        match self.dictionary.get(name) {
            Some(SubstitutionSource::Parameter(key)) => {
                Ok(self.source.get_text(key).unwrap_or_else(|| unresolved(name)))
            }
            Some(SubstitutionSource::Attribute { object, field }) => Ok(self
                .bindings
                .attribute(*object, field)
                .map(|raw| html_to_text(&raw))
                .unwrap_or_else(|| unresolved(name))),
            Some(SubstitutionSource::Calculated) => {
                Ok(calculate(name, &self.bindings).unwrap_or_else(|| unresolved(name)))
            }
            None => match self.services {
                Some(services) => services.parse_custom_param_value(value),
                None => Ok(value.to_string()),
            },
        }
    }
}

fn unresolved(name: &str) -> String {
    format!("{}{}", SUBSTITUTION, name)
}
