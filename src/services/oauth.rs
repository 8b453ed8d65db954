use crate::constants::oauth;
use crate::errors::LaunchError;
use crate::model::SignatureMethod;
use crate::utils::urls::split_query;
use base64::Engine;
use hmac::{Hmac, Mac};
use indexmap::IndexMap;
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

const SIGNATURE: &str = "oauth_signature";

/// RFC 3986 percent-encoding as OAuth 1.0a requires it.
pub fn percent_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Signs launch parameters with a tool's consumer key and shared secret.
#[derive(Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    shared_secret: String,
    method: SignatureMethod,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .field("shared_secret", &"***")
            .field("method", &self.method)
            .finish()
    }
}

impl OAuthSigner {
    pub fn new(consumer_key: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            shared_secret: shared_secret.into(),
            method: SignatureMethod::default(),
        }
    }

    pub fn with_method(mut self, method: SignatureMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns `params` plus the `oauth_*` protocol parameters and signature.
    pub fn sign(
        &self,
        method: &str,
        endpoint: &str,
        params: &IndexMap<String, String>,
        nonce: &str,
        timestamp: i64,
    ) -> Result<IndexMap<String, String>, LaunchError> {
        let mut signed = params.clone();
        signed.insert("oauth_version".to_string(), oauth::VERSION.to_string());
        signed.insert("oauth_nonce".to_string(), nonce.to_string());
        signed.insert("oauth_timestamp".to_string(), timestamp.to_string());
        signed.insert("oauth_consumer_key".to_string(), self.consumer_key.clone());
        signed.insert(
            "oauth_signature_method".to_string(),
            self.method.as_str().to_string(),
        );
        signed.shift_remove(SIGNATURE);
        let signature = self.signature(method, endpoint, &signed)?;
        signed.insert(SIGNATURE.to_string(), signature);
        Ok(signed)
    }

    /// Recomputes the signature of an already signed parameter set.
    pub fn verify(
        &self,
        method: &str,
        endpoint: &str,
        signed: &IndexMap<String, String>,
    ) -> Result<bool, LaunchError> {
        let Some(provided) = signed.get(SIGNATURE) else {
            return Ok(false);
        };
        let mut unsigned = signed.clone();
        unsigned.shift_remove(SIGNATURE);
        Ok(&self.signature(method, endpoint, &unsigned)? == provided)
    }

    fn signature(
        &self,
        method: &str,
        endpoint: &str,
        params: &IndexMap<String, String>,
    ) -> Result<String, LaunchError> {
        let base = base_string(method, endpoint, params)?;
        let key = format!("{}&", percent_encode(&self.shared_secret));
        let digest = match self.method {
            SignatureMethod::HmacSha1 => {
                let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(invalid_key)?;
                mac.update(base.as_bytes());
                mac.finalize().into_bytes().to_vec()
            }
            SignatureMethod::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(invalid_key)?;
                mac.update(base.as_bytes());
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(base64::engine::general_purpose::STANDARD.encode(digest))
    }
}

fn invalid_key(err: hmac::digest::InvalidLength) -> LaunchError {
    LaunchError::internal(format!("invalid signing key: {}", err))
}

/// `METHOD&encoded-url&encoded-sorted-params`; endpoint query parameters are
/// folded into the parameter list.
pub fn base_string(
    method: &str,
    endpoint: &str,
    params: &IndexMap<String, String>,
) -> Result<String, LaunchError> {
    let (base_url, query) = split_query(endpoint).ok_or_else(|| {
        LaunchError::invalid_params(format!("Launch URL is not a valid URL: {}", endpoint))
            .with_hint("Tool URLs must be absolute, e.g. https://tool.example/launch.")
    })?;
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .chain(
            query
                .iter()
                .map(|(key, value)| (percent_encode(key), percent_encode(value))),
        )
        .collect();
    pairs.sort();
    let joined = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    Ok(format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_url),
        percent_encode(&joined)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> IndexMap<String, String> {
        let mut params = IndexMap::new();
        params.insert("user_id".to_string(), "3".to_string());
        params.insert("resource_link_title".to_string(), "Quiz & notes".to_string());
        params
    }

    #[test]
    fn percent_encoding_follows_rfc3986() {
        assert_eq!(percent_encode("a b+c*~"), "a%20b%2Bc%2A~");
        assert_eq!(percent_encode("Quiz & notes"), "Quiz%20%26%20notes");
        assert_eq!(percent_encode("-._"), "-._");
    }

    #[test]
    fn base_string_folds_query_and_sorts() {
        let base = base_string("post", "https://Tool.test/launch?b=2&a=1", &params()).unwrap();
        assert_eq!(
            base,
            "POST&https%3A%2F%2Ftool.test%2Flaunch&a%3D1%26b%3D2%26resource_link_title%3DQuiz%2520%2526%2520notes%26user_id%3D3"
        );
    }

    #[test]
    fn signature_is_stable_and_verifiable() {
        let signer = OAuthSigner::new("key", "secret");
        let first = signer
            .sign("POST", "https://tool.test/launch", &params(), "nonce", 1_700_000_000)
            .unwrap();
        let second = signer
            .sign("POST", "https://tool.test/launch", &params(), "nonce", 1_700_000_000)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first["oauth_signature_method"], "HMAC-SHA1");
        assert_eq!(first["oauth_signature"], "iWLuiXXlx5D+DkiEJFqIc6AXTaY=");
        assert_eq!(first["oauth_consumer_key"], "key");
        assert!(signer.verify("POST", "https://tool.test/launch", &first).unwrap());

        let other = OAuthSigner::new("key", "other");
        assert!(!other.verify("POST", "https://tool.test/launch", &first).unwrap());
    }

    #[test]
    fn sha256_signatures_verify_only_with_the_same_method() {
        let signer = OAuthSigner::new("key", "secret").with_method(SignatureMethod::HmacSha256);
        let signed = signer
            .sign("POST", "https://tool.test/launch", &params(), "nonce", 1_700_000_000)
            .unwrap();
        assert_eq!(signed["oauth_signature_method"], "HMAC-SHA256");
        assert!(signer.verify("POST", "https://tool.test/launch", &signed).unwrap());
        assert!(!OAuthSigner::new("key", "secret")
            .verify("POST", "https://tool.test/launch", &signed)
            .unwrap());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = base_string("POST", "not a url", &params()).unwrap_err();
        assert_eq!(err.code, "INVALID_PARAMS");
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", OAuthSigner::new("key", "secret"));
        assert!(!rendered.contains("secret\""));
        assert!(rendered.contains("***"));
    }
}
