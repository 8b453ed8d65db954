use crate::errors::LaunchError;
use crate::model::{ParameterMap, ToolConfiguration, ToolSetting};
use crate::resolvers::ParameterResolver;

pub const NAME_KEYS: &[&str] = &[
    "lis_person_name_given",
    "lis_person_name_family",
    "lis_person_name_full",
    "ext_user_username",
    "lis_person_sourcedid",
];

pub const EMAIL_KEYS: &[&str] = &["lis_person_contact_email_primary"];

/// Strips personal fields the tool may not receive. Must run after every
/// resolver that can write them.
///
/// Names are kept only when `send_name` is `always`. Email is removed when
/// `send_email` is `always`; the two conditions are not mirrored.
#[derive(Debug, Clone, Copy)]
pub struct PrivacyResolver {
    send_name: ToolSetting,
    send_email: ToolSetting,
}

impl PrivacyResolver {
    pub fn new(send_name: ToolSetting, send_email: ToolSetting) -> Self {
        Self {
            send_name,
            send_email,
        }
    }

    pub fn for_tool(tool: &ToolConfiguration) -> Self {
        Self::new(tool.send_name, tool.send_email)
    }
}

impl ParameterResolver for PrivacyResolver {
    fn name(&self) -> &'static str {
        "privacy"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        if self.send_name != ToolSetting::Always {
            for key in NAME_KEYS {
                params.remove(key);
            }
        }
        if self.send_email == ToolSetting::Always {
            for key in EMAIL_KEYS {
                params.remove(key);
            }
        }
        Ok(params)
    }
}
