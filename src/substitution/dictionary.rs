use indexmap::IndexMap;

/// Object a substitution attribute is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundObject {
    User,
    Course,
}

/// Where the value of a substitution variable comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionSource {
    /// A key of the flat parameter map built so far.
    Parameter(String),
    /// A field of the acting user or the current course.
    Attribute { object: BoundObject, field: String },
    /// Computed by [`crate::substitution::calculated::calculate`].
    Calculated,
}

fn param(key: &str) -> SubstitutionSource {
    SubstitutionSource::Parameter(key.to_string())
}

fn user(field: &str) -> SubstitutionSource {
    SubstitutionSource::Attribute {
        object: BoundObject::User,
        field: field.to_string(),
    }
}

fn course(field: &str) -> SubstitutionSource {
    SubstitutionSource::Attribute {
        object: BoundObject::Course,
        field: field.to_string(),
    }
}

/// Variable name to source lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionDictionary {
    entries: IndexMap<String, SubstitutionSource>,
}

impl Default for SubstitutionDictionary {
    fn default() -> Self {
        Self::standard()
    }
}

impl SubstitutionDictionary {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// The variables every launch understands.
    pub fn standard() -> Self {
        let entries: Vec<(&str, SubstitutionSource)> = vec![
            ("Context.id", param("context_id")),
            ("Context.title", param("context_title")),
            ("Context.label", param("context_label")),
            ("Context.id.history", SubstitutionSource::Calculated),
            ("Context.sourcedId", param("lis_course_section_sourcedid")),
            ("Context.longDescription", course("summary")),
            ("Context.timeFrame.begin", course("startdate")),
            ("CourseSection.title", param("context_title")),
            ("CourseSection.label", param("context_label")),
            ("CourseSection.sourcedId", param("lis_course_section_sourcedid")),
            ("CourseSection.longDescription", course("summary")),
            ("CourseSection.timeFrame.begin", SubstitutionSource::Calculated),
            ("CourseSection.timeFrame.end", SubstitutionSource::Calculated),
            ("ResourceLink.id", param("resource_link_id")),
            ("ResourceLink.title", param("resource_link_title")),
            ("ResourceLink.description", param("resource_link_description")),
            ("User.id", param("user_id")),
            ("User.username", user("username")),
            ("Person.name.full", param("lis_person_name_full")),
            ("Person.name.given", param("lis_person_name_given")),
            ("Person.name.family", param("lis_person_name_family")),
            ("Person.email.primary", param("lis_person_contact_email_primary")),
            ("Person.sourcedId", param("lis_person_sourcedid")),
            ("Person.name.middle", user("middlename")),
            ("Person.address.street1", user("address")),
            ("Person.address.locality", user("city")),
            ("Person.address.country", user("country")),
            ("Person.address.timezone", user("timezone")),
            ("Person.phone.primary", user("phone1")),
            ("Person.phone.mobile", user("phone2")),
            ("Person.webaddress", user("url")),
            ("Membership.role", param("roles")),
            ("Result.sourcedId", param("lis_result_sourcedid")),
            ("Result.autocreate", param("lis_outcome_service_url")),
            ("BasicOutcome.sourcedId", param("lis_result_sourcedid")),
            ("BasicOutcome.url", param("lis_outcome_service_url")),
            ("Moodle.Person.userGroupIds", SubstitutionSource::Calculated),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(name, source)| (name.to_string(), source))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SubstitutionSource> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, source: SubstitutionSource) {
        self.entries.insert(name.into(), source);
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_dictionary_covers_core_variables() {
        let dictionary = SubstitutionDictionary::standard();
        assert_eq!(
            dictionary.get("User.id"),
            Some(&SubstitutionSource::Parameter("user_id".to_string()))
        );
        assert_eq!(
            dictionary.get("Moodle.Person.userGroupIds"),
            Some(&SubstitutionSource::Calculated)
        );
        assert!(!dictionary.contains("LineItems.url"));
    }
}
