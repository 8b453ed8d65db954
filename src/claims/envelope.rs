use crate::claims::formatter::PayloadFormatter;
use crate::constants::claims::{DEPLOYMENT_ID, TARGET_LINK_URI, TOKEN_LIFETIME_SECS};
use crate::model::ParameterMap;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Registered JWT claims wrapped around a formatted launch payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchClaims {
    pub issuer: String,
    pub audience: String,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub deployment_id: String,
    pub target_link_uri: String,
}

impl LaunchClaims {
    pub fn expires_at(&self) -> i64 {
        self.issued_at.timestamp() + TOKEN_LIFETIME_SECS
    }

    /// Formats `params` and adds the envelope. Envelope claims win over
    /// anything the parameters produced under the same name.
    pub fn seal(&self, formatter: &PayloadFormatter<'_>, params: &ParameterMap) -> Map<String, Value> {
        let mut payload = formatter.format(params);
        payload.insert("iss".to_string(), Value::String(self.issuer.clone()));
        payload.insert("aud".to_string(), Value::String(self.audience.clone()));
        payload.insert("nonce".to_string(), Value::String(self.nonce.clone()));
        payload.insert("iat".to_string(), Value::from(self.issued_at.timestamp()));
        payload.insert("exp".to_string(), Value::from(self.expires_at()));
        payload.insert(
            DEPLOYMENT_ID.to_string(),
            Value::String(self.deployment_id.clone()),
        );
        payload.insert(
            TARGET_LINK_URI.to_string(),
            Value::String(self.target_link_uri.clone()),
        );
        payload
    }
}
