use crate::constants::prefixes::CUSTOM;
use crate::errors::LaunchError;
use crate::model::{KeyNormalization, ParameterMap};
use crate::resolvers::ParameterResolver;

/// Lowercases and replaces every character outside `[a-z0-9]` with `_`.
pub fn normalize_key_name(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Rewrites the names of `custom_` keys according to the tool's mode.
pub struct KeyNormalizationResolver {
    mode: KeyNormalization,
}

impl KeyNormalizationResolver {
    pub fn new(mode: KeyNormalization) -> Self {
        Self { mode }
    }
}

impl ParameterResolver for KeyNormalizationResolver {
    fn name(&self) -> &'static str {
        "key_normalization"
    }

    fn resolve(&self, params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        if self.mode == KeyNormalization::Passthrough {
            return Ok(params);
        }
        let mut out = ParameterMap::new();
        for (key, value) in params {
            let Some(name) = key.strip_prefix(CUSTOM) else {
                out.insert(key, value);
                continue;
            };
            let normalized = format!("{}{}", CUSTOM, normalize_key_name(name));
            if normalized == key {
                out.insert(key, value);
                continue;
            }
            if self.mode == KeyNormalization::Duplicate {
                out.insert(key.clone(), value.clone());
            }
            out.insert(normalized, value);
        }
        Ok(out)
    }
}
