pub mod versions {
    pub const LTI_1P0: &str = "LTI-1p0";
    pub const LTI_1P3: &str = "1.3.0";
}

pub mod message_types {
    pub const BASIC_LAUNCH: &str = "basic-lti-launch-request";
    pub const CONTENT_ITEM_SELECTION: &str = "ContentItemSelectionRequest";
    pub const RESOURCE_LINK_REQUEST: &str = "LtiResourceLinkRequest";
    pub const DEEP_LINKING_REQUEST: &str = "LtiDeepLinkingRequest";
}

pub mod claims {
    pub const PREFIX: &str = "https://purl.imsglobal.org/spec/lti";
    pub const CUSTOM: &str = "https://purl.imsglobal.org/spec/lti/claim/custom";
    pub const EXT: &str = "https://purl.imsglobal.org/spec/lti/claim/ext";
    pub const DEPLOYMENT_ID: &str = "https://purl.imsglobal.org/spec/lti/claim/deployment_id";
    pub const TARGET_LINK_URI: &str = "https://purl.imsglobal.org/spec/lti/claim/target_link_uri";
    pub const TOKEN_LIFETIME_SECS: i64 = 60;
}

pub mod vocab {
    pub const COURSE: &str = "http://purl.imsglobal.org/vocab/lis/v2/course#";
    pub const MEMBERSHIP: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#";
    pub const INSTITUTION: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#";
    pub const SYSTEM: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#";
    pub const LEGACY_SYSROLE_ADMIN: &str = "urn:lti:sysrole:ims/lis/Administrator";
    pub const LEGACY_INSTROLE_ADMIN: &str = "urn:lti:instrole:ims/lis/Administrator";
}

pub mod prefixes {
    pub const CUSTOM: &str = "custom_";
    pub const EXT: &str = "ext_";
    pub const SUBSTITUTION: char = '$';
    pub const ESCAPE: char = '\\';
}

pub mod consumer {
    pub const EXT_LMS: &str = "moodle-2";
    pub const PRODUCT_FAMILY_CODE: &str = "moodle";
    pub const OAUTH_CALLBACK: &str = "about:blank";
    pub const SITE_COURSE_FORMAT: &str = "site";
}

pub mod oauth {
    pub const VERSION: &str = "1.0";
    pub const HMAC_SHA1: &str = "HMAC-SHA1";
    pub const HMAC_SHA256: &str = "HMAC-SHA256";
}
