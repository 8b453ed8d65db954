use crate::constants::{message_types, versions, vocab};

/// Flat (1.1) message type → 1.3 message type. Unknown types pass through.
pub fn message_type_to_claim(value: &str) -> &str {
    match value {
        message_types::BASIC_LAUNCH => message_types::RESOURCE_LINK_REQUEST,
        message_types::CONTENT_ITEM_SELECTION => message_types::DEEP_LINKING_REQUEST,
        other => other,
    }
}

pub fn message_type_from_claim(value: &str) -> &str {
    match value {
        message_types::RESOURCE_LINK_REQUEST => message_types::BASIC_LAUNCH,
        message_types::DEEP_LINKING_REQUEST => message_types::CONTENT_ITEM_SELECTION,
        other => other,
    }
}

pub fn version_to_claim(value: &str) -> &str {
    match value {
        versions::LTI_1P0 => versions::LTI_1P3,
        other => other,
    }
}

fn is_qualified(value: &str) -> bool {
    value.contains("://") || value.starts_with("urn:")
}

/// `CourseOffering` → `http://purl.imsglobal.org/vocab/lis/v2/course#CourseOffering`.
pub fn qualify_context_type(value: &str) -> String {
    if is_qualified(value) {
        return value.to_string();
    }
    format!("{}{}", vocab::COURSE, value)
}

pub fn unqualify_context_type(value: &str) -> &str {
    value.strip_prefix(vocab::COURSE).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_types_map_both_ways() {
        assert_eq!(message_type_to_claim("basic-lti-launch-request"), "LtiResourceLinkRequest");
        assert_eq!(message_type_to_claim("ContentItemSelectionRequest"), "LtiDeepLinkingRequest");
        assert_eq!(message_type_to_claim("LtiSubmissionReviewRequest"), "LtiSubmissionReviewRequest");
        assert_eq!(message_type_from_claim("LtiResourceLinkRequest"), "basic-lti-launch-request");
    }

    #[test]
    fn context_types_are_qualified_once() {
        let qualified = qualify_context_type("CourseSection");
        assert_eq!(qualified, "http://purl.imsglobal.org/vocab/lis/v2/course#CourseSection");
        assert_eq!(qualify_context_type(&qualified), qualified);
        assert_eq!(
            qualify_context_type("urn:lti:context-type:ims/lis/Group"),
            "urn:lti:context-type:ims/lis/Group"
        );
        assert_eq!(unqualify_context_type(&qualified), "CourseSection");
    }
}
