use crate::constants::vocab;
use crate::errors::LaunchError;
use crate::model::{LaunchUser, ParameterMap, ToolConfiguration};
use crate::resolvers::ParameterResolver;

/// User identity, roles and personal fields.
///
/// Personal fields are always populated here; [`super::PrivacyResolver`]
/// decides what survives.
pub struct LisResolver<'a> {
    user: &'a LaunchUser,
    tool: &'a ToolConfiguration,
}

impl<'a> LisResolver<'a> {
    pub fn new(user: &'a LaunchUser, tool: &'a ToolConfiguration) -> Self {
        Self { user, tool }
    }

    fn roles(&self) -> String {
        let lti13 = self.tool.is_lti13();
        let base = if self.user.is_instructor {
            "Instructor"
        } else {
            "Learner"
        };
        let mut roles = Vec::new();
        if lti13 {
            roles.push(format!("{}{}", vocab::MEMBERSHIP, base));
        } else {
            roles.push(base.to_string());
        }
        if self.user.is_site_admin {
            if lti13 {
                roles.push(format!("{}Administrator", vocab::SYSTEM));
                roles.push(format!("{}Administrator", vocab::INSTITUTION));
            } else {
                roles.push(vocab::LEGACY_SYSROLE_ADMIN.to_string());
                roles.push(vocab::LEGACY_INSTROLE_ADMIN.to_string());
            }
        }
        roles.join(",")
    }
}

impl ParameterResolver for LisResolver<'_> {
    fn name(&self) -> &'static str {
        "lis"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        params.insert("user_id", &self.user.id);
        params.insert("lis_person_sourcedid", &self.user.idnumber);
        params.insert("roles", self.roles());
        params.insert("lis_person_name_given", &self.user.firstname);
        params.insert("lis_person_name_family", &self.user.lastname);
        params.insert("lis_person_name_full", self.user.full_name());
        params.insert("ext_user_username", &self.user.username);
        params.insert("lis_person_contact_email_primary", &self.user.email);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LtiVersion;

    #[test]
    fn legacy_roles_for_lti11() {
        let mut user = LaunchUser::new("3");
        user.is_instructor = true;
        user.is_site_admin = true;
        let tool = ToolConfiguration::new("4", "https://tool.test");
        let params = LisResolver::new(&user, &tool)
            .resolve(ParameterMap::new())
            .unwrap();
        assert_eq!(
            params.get_text("roles").as_deref(),
            Some("Instructor,urn:lti:sysrole:ims/lis/Administrator,urn:lti:instrole:ims/lis/Administrator")
        );
    }

    #[test]
    fn vocabulary_roles_for_lti13() {
        let user = LaunchUser::new("3");
        let mut tool = ToolConfiguration::new("4", "https://tool.test");
        tool.version = LtiVersion::Lti1p3;
        let params = LisResolver::new(&user, &tool)
            .resolve(ParameterMap::new())
            .unwrap();
        assert_eq!(
            params.get_text("roles").as_deref(),
            Some("http://purl.imsglobal.org/vocab/lis/v2/membership#Learner")
        );
    }
}
