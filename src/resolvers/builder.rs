use crate::errors::LaunchError;
use crate::model::{ParamValue, ParameterMap};
use crate::resolvers::ParameterResolver;
use crate::services::logger::{LogLevel, Logger};

/// Threads a seed map through an ordered list of resolvers.
pub struct ParametersBuilder<'a> {
    logger: Logger,
    seed: ParameterMap,
    resolvers: Vec<Box<dyn ParameterResolver + 'a>>,
}

impl<'a> ParametersBuilder<'a> {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("builder"),
            seed: ParameterMap::new(),
            resolvers: Vec::new(),
        }
    }

    pub fn with_seed(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.seed.insert(key, value);
        self
    }

    pub fn with_seeds(mut self, seeds: ParameterMap) -> Self {
        self.seed.merge(seeds);
        self
    }

    pub fn with_resolver(mut self, resolver: impl ParameterResolver + 'a) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn push(&mut self, resolver: Box<dyn ParameterResolver + 'a>) {
        self.resolvers.push(resolver);
    }

    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|resolver| resolver.name()).collect()
    }

    pub fn build(self) -> Result<ParameterMap, LaunchError> {
        let mut params = self.seed;
        for resolver in &self.resolvers {
            let before: Option<Vec<String>> = self
                .logger
                .enabled(LogLevel::Debug)
                .then(|| params.keys().cloned().collect());
            params = resolver.resolve(params)?;
            if let Some(before) = before {
                let added: Vec<&String> = params
                    .keys()
                    .filter(|key| !before.contains(key))
                    .collect();
                let removed: Vec<&String> = before
                    .iter()
                    .filter(|key| !params.contains_key(key))
                    .collect();
                self.logger.debug(
                    "Resolver applied",
                    Some(&serde_json::json!({
                        "resolver": resolver.name(),
                        "added": added,
                        "removed": removed,
                    })),
                );
            }
        }
        Ok(params)
    }
}
