use crate::constants::{oauth, versions};
use serde::{Deserialize, Serialize};

/// Three-way tool setting used for privacy and grading options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolSetting {
    #[default]
    Never,
    Always,
    Delegate,
}

/// Where the tool is displayed once launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchContainer {
    #[default]
    Default,
    Embed,
    EmbedNoBlocks,
    Window,
    ReplaceWindow,
}

impl LaunchContainer {
    /// Value of `launch_presentation_document_target`. Empty means caller default.
    pub fn document_target(self) -> &'static str {
        match self {
            LaunchContainer::Embed | LaunchContainer::EmbedNoBlocks => "iframe",
            LaunchContainer::ReplaceWindow => "frame",
            LaunchContainer::Window => "window",
            LaunchContainer::Default => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LtiVersion {
    #[default]
    #[serde(rename = "LTI-1p0")]
    Lti1p1,
    #[serde(rename = "1.3.0")]
    Lti1p3,
}

impl LtiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            LtiVersion::Lti1p1 => versions::LTI_1P0,
            LtiVersion::Lti1p3 => versions::LTI_1P3,
        }
    }
}

/// OAuth 1.0a signature method for 1.1 launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignatureMethod {
    #[default]
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
}

impl SignatureMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => oauth::HMAC_SHA1,
            SignatureMethod::HmacSha256 => oauth::HMAC_SHA256,
        }
    }
}

/// How `custom_` keys are rewritten after all custom parameters are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNormalization {
    Passthrough,
    Duplicate,
    Replace,
}

/// Registration-level settings of an external tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfiguration {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub custom_parameters: String,
    #[serde(default)]
    pub send_name: ToolSetting,
    #[serde(default)]
    pub send_email: ToolSetting,
    #[serde(default)]
    pub accept_grades: ToolSetting,
    #[serde(default)]
    pub launch_container: LaunchContainer,
    #[serde(default)]
    pub force_ssl: bool,
    #[serde(default)]
    pub version: LtiVersion,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub consumer_key: Option<String>,
    #[serde(default)]
    pub shared_secret: Option<String>,
    #[serde(default)]
    pub signature_method: SignatureMethod,
    #[serde(default)]
    pub initiate_login_url: Option<String>,
    #[serde(default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub key_normalization: Option<KeyNormalization>,
}

impl ToolConfiguration {
    pub fn new(id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            base_url: base_url.into(),
            custom_parameters: String::new(),
            send_name: ToolSetting::Never,
            send_email: ToolSetting::Never,
            accept_grades: ToolSetting::Never,
            launch_container: LaunchContainer::Default,
            force_ssl: false,
            version: LtiVersion::Lti1p1,
            client_id: None,
            consumer_key: None,
            shared_secret: None,
            signature_method: SignatureMethod::HmacSha1,
            initiate_login_url: None,
            deployment_id: None,
            key_normalization: None,
        }
    }

    pub fn is_lti13(&self) -> bool {
        self.version == LtiVersion::Lti1p3
    }

    /// 1.1 tools only see normalized keys; 1.3 tools get both spellings.
    pub fn key_normalization(&self) -> KeyNormalization {
        self.key_normalization.unwrap_or(match self.version {
            LtiVersion::Lti1p1 => KeyNormalization::Replace,
            LtiVersion::Lti1p3 => KeyNormalization::Duplicate,
        })
    }

    pub fn deployment_id(&self) -> &str {
        match self.deployment_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => &self.id,
        }
    }

    pub fn accepts_grades(&self) -> bool {
        matches!(
            self.accept_grades,
            ToolSetting::Always | ToolSetting::Delegate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_targets_follow_container() {
        assert_eq!(LaunchContainer::Embed.document_target(), "iframe");
        assert_eq!(LaunchContainer::EmbedNoBlocks.document_target(), "iframe");
        assert_eq!(LaunchContainer::ReplaceWindow.document_target(), "frame");
        assert_eq!(LaunchContainer::Window.document_target(), "window");
        assert_eq!(LaunchContainer::Default.document_target(), "");
    }

    #[test]
    fn deployment_id_falls_back_to_tool_id() {
        let mut tool = ToolConfiguration::new("4", "https://tool.test");
        tool.deployment_id = Some("  ".to_string());
        assert_eq!(tool.deployment_id(), "4");
        tool.deployment_id = Some("dep-1".to_string());
        assert_eq!(tool.deployment_id(), "dep-1");
    }

    #[test]
    fn deserializes_with_defaults() {
        let tool: ToolConfiguration = serde_json::from_value(serde_json::json!({
            "id": "4",
            "base_url": "https://tool.example/launch",
            "version": "1.3.0",
            "send_name": "always"
        }))
        .unwrap();
        assert!(tool.is_lti13());
        assert_eq!(tool.send_name, ToolSetting::Always);
        assert_eq!(tool.send_email, ToolSetting::Never);
        assert_eq!(tool.key_normalization(), KeyNormalization::Duplicate);
        assert_eq!(tool.deployment_id(), "4");
        assert_eq!(tool.signature_method, SignatureMethod::HmacSha1);

        let tool: ToolConfiguration = serde_json::from_value(serde_json::json!({
            "id": "4",
            "base_url": "https://tool.example/launch",
            "signature_method": "HMAC-SHA256"
        }))
        .unwrap();
        assert_eq!(tool.signature_method, SignatureMethod::HmacSha256);
    }
}
