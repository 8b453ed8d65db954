use crate::constants::prefixes::CUSTOM;
use crate::errors::LaunchError;
use crate::model::ParameterMap;
use crate::substitution::resolver::SubstitutionResolver;
use indexmap::IndexMap;

/// Splits a stored custom-parameter string into name/value pairs.
///
/// Entries are separated by newlines or `;` and written `name=value`. Both
/// sides are trimmed; entries without `=` or with an empty name are skipped.
/// A repeated name keeps its last value.
pub fn split_custom_parameters(raw: &str) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    for line in raw.split(['\n', ';']) {
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        out.insert(name.to_string(), value.trim().to_string());
    }
    out
}

/// Resolves every entry of a custom-parameter string through a
/// [`SubstitutionResolver`].
pub struct CustomParameterParser<'a> {
    resolver: SubstitutionResolver<'a>,
}

impl<'a> CustomParameterParser<'a> {
    pub fn new(resolver: SubstitutionResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn parse_value(&self, value: &str) -> Result<String, LaunchError> {
        self.resolver.resolve(value)
    }

    /// Returns `custom_<name>` keys in source order.
    pub fn parse(&self, raw: &str) -> Result<ParameterMap, LaunchError> {
        let mut out = ParameterMap::new();
        for (name, value) in split_custom_parameters(raw) {
            let resolved = self.parse_value(&value)?;
            out.insert(format!("{}{}", CUSTOM, name), resolved);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LaunchCourse, LaunchUser};
    use crate::substitution::dictionary::SubstitutionDictionary;
    use crate::substitution::resolver::SubstitutionBindings;

    #[test]
    fn split_handles_separators_and_junk() {
        let parsed = split_custom_parameters("a=1\r\n b = two ;novalue\n=orphan\nc=x=y\na=3");
        let pairs: Vec<(&str, &str)> = parsed
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "two"), ("c", "x=y")]);
    }

    #[test]
    fn parse_prefixes_keys_and_resolves_values() {
        let user = LaunchUser::new("3");
        let course = LaunchCourse::new("2");
        let source: ParameterMap = [("user_id", "3")].into_iter().collect();
        let dictionary = SubstitutionDictionary::standard();
        let resolver = SubstitutionResolver::new(
            &dictionary,
            SubstitutionBindings {
                user: &user,
                course: &course,
            },
            &source,
        );
        let parser = CustomParameterParser::new(resolver);
        let parsed = parser
            .parse("uid=$User.id\nLiteral=\\$User.id\nName=$Person.name.full")
            .unwrap();
        assert_eq!(parsed.get_text("custom_uid").as_deref(), Some("3"));
        assert_eq!(parsed.get_text("custom_Literal").as_deref(), Some("$User.id"));
        assert_eq!(
            parsed.get_text("custom_Name").as_deref(),
            Some("$Person.name.full")
        );
    }
}
