use crate::errors::LaunchError;
use crate::model::{LaunchUser, ParameterMap, ResourceLink, ToolConfiguration};
use crate::resolvers::ParameterResolver;
use crate::services::site_config::SiteConfig;
use crate::utils::urls::ensure_url_is_https;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedIdData {
    pub instanceid: String,
    pub userid: String,
    pub typeid: String,
    pub launchid: String,
}

/// The `lis_result_sourcedid` envelope: data plus a salted SHA-256 of its JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedId {
    pub data: SourcedIdData,
    pub hash: String,
}

impl SourcedId {
    pub fn sign(data: SourcedIdData, salt: &str) -> Result<Self, LaunchError> {
        let hash = Self::hash(&data, salt)?;
        Ok(Self { data, hash })
    }

    fn hash(data: &SourcedIdData, salt: &str) -> Result<String, LaunchError> {
        let json = serde_json::to_string(data)?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        hasher.update(salt.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    pub fn verify(&self, salt: &str) -> bool {
        Self::hash(&self.data, salt)
            .map(|expected| expected == self.hash)
            .unwrap_or(false)
    }
}

/// Basic-outcomes grading fields, added only for gradable placements.
pub struct OutcomeResolver<'a> {
    tool: &'a ToolConfiguration,
    link: &'a ResourceLink,
    user: &'a LaunchUser,
    site: &'a SiteConfig,
    launch_id: &'a str,
}

impl<'a> OutcomeResolver<'a> {
    pub fn new(
        tool: &'a ToolConfiguration,
        link: &'a ResourceLink,
        user: &'a LaunchUser,
        site: &'a SiteConfig,
        launch_id: &'a str,
    ) -> Self {
        Self {
            tool,
            link,
            user,
            site,
            launch_id,
        }
    }
}

impl ParameterResolver for OutcomeResolver<'_> {
    fn name(&self) -> &'static str {
        "outcome"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        let Some(salt) = self.link.service_salt() else {
            return Ok(params);
        };
        if !self.link.gradable || !self.tool.accepts_grades() {
            return Ok(params);
        }
        let sourcedid = SourcedId::sign(
            SourcedIdData {
                instanceid: self.link.id.clone(),
                userid: self.user.id.clone(),
                typeid: self.tool.id.clone(),
                launchid: self.launch_id.to_string(),
            },
            salt,
        )?;
        params.insert("lis_result_sourcedid", serde_json::to_string(&sourcedid)?);
        let mut service_url = self.site.outcome_service_url();
        if self.tool.force_ssl || self.site.force_ssl {
            service_url = ensure_url_is_https(&service_url);
        }
        params.insert("lis_outcome_service_url", service_url);
        Ok(params)
    }
}
