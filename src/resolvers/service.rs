use crate::constants::prefixes::{CUSTOM, EXT};
use crate::errors::LaunchError;
use crate::model::{ParamValue, ParameterMap};
use crate::resolvers::custom::SubstitutionScope;
use crate::resolvers::ParameterResolver;
use crate::services::launch_services::LaunchServiceFacade;

/// Launch parameters contributed by service plugins.
///
/// Text values go through substitution. Keys without a `custom_` or `ext_`
/// prefix are stored under `custom_`.
pub struct ServiceParametersResolver<'a> {
    services: &'a dyn LaunchServiceFacade,
    scope: SubstitutionScope<'a>,
}

impl<'a> ServiceParametersResolver<'a> {
    pub fn new(services: &'a dyn LaunchServiceFacade, scope: SubstitutionScope<'a>) -> Self {
        Self { services, scope }
    }
}

impl ParameterResolver for ServiceParametersResolver<'_> {
    fn name(&self) -> &'static str {
        "service_parameters"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        let contributed = self.services.get_launch_parameters()?;
        if contributed.is_empty() {
            return Ok(params);
        }
        let source = self.scope.visible(&params)?;
        let mut resolved = ParameterMap::new();
        {
            let resolver = self.scope.resolver(&source);
            for (key, value) in contributed {
                let key = if key.starts_with(CUSTOM) || key.starts_with(EXT) {
                    key
                } else {
                    format!("{}{}", CUSTOM, key)
                };
                let value = match value {
                    ParamValue::Text(text) => ParamValue::Text(resolver.resolve(&text)?),
                    list => list,
                };
                resolved.insert(key, value);
            }
        }
        params.merge(resolved);
        Ok(params)
    }
}
