use crate::constants::claims::PREFIX;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Where a flat parameter lands in the claim set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimGroup {
    /// Plain top-level key, e.g. `sub` or `email`.
    TopLevel,
    /// Namespaced key holding the value directly, e.g. `…/claim/roles`.
    Ungrouped,
    /// Field inside a namespaced object, e.g. `…/claim/context` → `id`.
    Nested(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimType {
    String,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimMapping {
    pub claim: &'static str,
    pub group: ClaimGroup,
    pub kind: ClaimType,
    pub is_array: bool,
    /// Namespace suffix, e.g. `dl` gives `https://purl.imsglobal.org/spec/lti-dl/claim/…`.
    pub suffix: Option<&'static str>,
}

impl ClaimMapping {
    const fn new(suffix: Option<&'static str>, group: ClaimGroup, claim: &'static str) -> Self {
        Self {
            claim,
            group,
            kind: ClaimType::String,
            is_array: false,
            suffix,
        }
    }

    const fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    const fn boolean(mut self) -> Self {
        self.kind = ClaimType::Boolean;
        self
    }

    /// `https://purl.imsglobal.org/spec/lti[-suffix]/claim/`
    pub fn namespace(&self) -> String {
        match self.suffix {
            Some(suffix) => format!("{}-{}/claim/", PREFIX, suffix),
            None => format!("{}/claim/", PREFIX),
        }
    }

    /// Top-level key of the claim set this mapping writes to.
    pub fn claim_key(&self) -> String {
        match self.group {
            ClaimGroup::TopLevel => self.claim.to_string(),
            ClaimGroup::Ungrouped => format!("{}{}", self.namespace(), self.claim),
            ClaimGroup::Nested(group) => format!("{}{}", self.namespace(), group),
        }
    }
}

/// Flat parameter name → claim placement.
#[derive(Debug, Clone)]
pub struct ClaimMappingTable {
    entries: IndexMap<&'static str, ClaimMapping>,
}

impl ClaimMappingTable {
    pub fn get(&self, key: &str) -> Option<&ClaimMapping> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &ClaimMapping)> {
        self.entries.iter()
    }

    /// Reverse lookup: the flat key written to `claim_key` (and `field` for
    /// nested objects).
    pub fn flat_key_for(&self, claim_key: &str, field: Option<&str>) -> Option<&'static str> {
        self.entries.iter().find_map(|(flat, mapping)| {
            if mapping.claim_key() != claim_key {
                return None;
            }
            match (mapping.group, field) {
                (ClaimGroup::Nested(_), Some(field)) if mapping.claim == field => Some(*flat),
                (ClaimGroup::TopLevel | ClaimGroup::Ungrouped, None) => Some(*flat),
                _ => None,
            }
        })
    }
}

pub static STANDARD_CLAIM_MAPPING: Lazy<ClaimMappingTable> = Lazy::new(standard_mapping);

fn standard_mapping() -> ClaimMappingTable {
    use ClaimGroup::{Nested, TopLevel, Ungrouped};
    const DL: Option<&str> = Some("dl");
    const AGS: Option<&str> = Some("ags");
    const NRPS: Option<&str> = Some("nrps");
    const BO: Option<&str> = Some("bo");
    let dl_settings = Nested("deep_linking_settings");
    let entries = [
        ("accept_media_types", ClaimMapping::new(DL, dl_settings, "accept_media_types").array()),
        ("accept_multiple", ClaimMapping::new(DL, dl_settings, "accept_multiple").boolean()),
        (
            "accept_presentation_document_targets",
            ClaimMapping::new(DL, dl_settings, "accept_presentation_document_targets").array(),
        ),
        ("accept_types", ClaimMapping::new(DL, dl_settings, "accept_types").array()),
        ("accept_unsigned", ClaimMapping::new(DL, dl_settings, "accept_unsigned").boolean()),
        ("auto_create", ClaimMapping::new(DL, dl_settings, "auto_create").boolean()),
        ("can_confirm", ClaimMapping::new(DL, dl_settings, "can_confirm").boolean()),
        ("content_item_return_url", ClaimMapping::new(DL, dl_settings, "deep_link_return_url")),
        ("content_items", ClaimMapping::new(DL, Ungrouped, "content_items")),
        ("data", ClaimMapping::new(DL, dl_settings, "data")),
        ("text", ClaimMapping::new(DL, dl_settings, "text")),
        ("title", ClaimMapping::new(DL, dl_settings, "title")),
        ("lti_msg", ClaimMapping::new(DL, Ungrouped, "msg")),
        ("lti_log", ClaimMapping::new(DL, Ungrouped, "log")),
        ("lti_errormsg", ClaimMapping::new(DL, Ungrouped, "errormsg")),
        ("lti_errorlog", ClaimMapping::new(DL, Ungrouped, "errorlog")),
        ("context_id", ClaimMapping::new(None, Nested("context"), "id")),
        ("context_label", ClaimMapping::new(None, Nested("context"), "label")),
        ("context_title", ClaimMapping::new(None, Nested("context"), "title")),
        ("context_type", ClaimMapping::new(None, Nested("context"), "type").array()),
        (
            "lis_course_offering_sourcedid",
            ClaimMapping::new(None, Nested("lis"), "course_offering_sourcedid"),
        ),
        (
            "lis_course_section_sourcedid",
            ClaimMapping::new(None, Nested("lis"), "course_section_sourcedid"),
        ),
        ("lis_person_sourcedid", ClaimMapping::new(None, Nested("lis"), "person_sourcedid")),
        (
            "launch_presentation_css_url",
            ClaimMapping::new(None, Nested("launch_presentation"), "css_url"),
        ),
        (
            "launch_presentation_document_target",
            ClaimMapping::new(None, Nested("launch_presentation"), "document_target"),
        ),
        (
            "launch_presentation_height",
            ClaimMapping::new(None, Nested("launch_presentation"), "height"),
        ),
        (
            "launch_presentation_locale",
            ClaimMapping::new(None, Nested("launch_presentation"), "locale"),
        ),
        (
            "launch_presentation_return_url",
            ClaimMapping::new(None, Nested("launch_presentation"), "return_url"),
        ),
        (
            "launch_presentation_width",
            ClaimMapping::new(None, Nested("launch_presentation"), "width"),
        ),
        ("lis_person_contact_email_primary", ClaimMapping::new(None, TopLevel, "email")),
        ("lis_person_name_family", ClaimMapping::new(None, TopLevel, "family_name")),
        ("lis_person_name_full", ClaimMapping::new(None, TopLevel, "name")),
        ("lis_person_name_given", ClaimMapping::new(None, TopLevel, "given_name")),
        ("user_id", ClaimMapping::new(None, TopLevel, "sub")),
        ("user_image", ClaimMapping::new(None, TopLevel, "picture")),
        ("roles", ClaimMapping::new(None, Ungrouped, "roles").array()),
        ("role_scope_mentor", ClaimMapping::new(None, Ungrouped, "role_scope_mentor").array()),
        ("deployment_id", ClaimMapping::new(None, Ungrouped, "deployment_id")),
        ("lti_message_type", ClaimMapping::new(None, Ungrouped, "message_type")),
        ("lti_version", ClaimMapping::new(None, Ungrouped, "version")),
        (
            "resource_link_description",
            ClaimMapping::new(None, Nested("resource_link"), "description"),
        ),
        ("resource_link_id", ClaimMapping::new(None, Nested("resource_link"), "id")),
        ("resource_link_title", ClaimMapping::new(None, Nested("resource_link"), "title")),
        (
            "tool_consumer_info_product_family_code",
            ClaimMapping::new(None, Nested("tool_platform"), "product_family_code"),
        ),
        (
            "tool_consumer_info_version",
            ClaimMapping::new(None, Nested("tool_platform"), "version"),
        ),
        (
            "tool_consumer_instance_contact_email",
            ClaimMapping::new(None, Nested("tool_platform"), "contact_email"),
        ),
        (
            "tool_consumer_instance_description",
            ClaimMapping::new(None, Nested("tool_platform"), "description"),
        ),
        ("tool_consumer_instance_guid", ClaimMapping::new(None, Nested("tool_platform"), "guid")),
        ("tool_consumer_instance_name", ClaimMapping::new(None, Nested("tool_platform"), "name")),
        ("tool_consumer_instance_url", ClaimMapping::new(None, Nested("tool_platform"), "url")),
        (
            "custom_context_memberships_v2_url",
            ClaimMapping::new(NRPS, Nested("namesroleservice"), "context_memberships_url"),
        ),
        (
            "custom_context_memberships_versions",
            ClaimMapping::new(NRPS, Nested("namesroleservice"), "service_versions").array(),
        ),
        ("custom_gradebookservices_scope", ClaimMapping::new(AGS, Nested("endpoint"), "scope").array()),
        ("custom_lineitems_url", ClaimMapping::new(AGS, Nested("endpoint"), "lineitems")),
        ("custom_lineitem_url", ClaimMapping::new(AGS, Nested("endpoint"), "lineitem")),
        ("custom_results_url", ClaimMapping::new(AGS, Nested("endpoint"), "results")),
        ("custom_result_url", ClaimMapping::new(AGS, Nested("endpoint"), "result")),
        ("custom_scores_url", ClaimMapping::new(AGS, Nested("endpoint"), "scores")),
        ("custom_score_url", ClaimMapping::new(AGS, Nested("endpoint"), "score")),
        (
            "lis_outcome_service_url",
            ClaimMapping::new(BO, Nested("basicoutcome"), "lis_outcome_service_url"),
        ),
        (
            "lis_result_sourcedid",
            ClaimMapping::new(BO, Nested("basicoutcome"), "lis_result_sourcedid"),
        ),
    ];
    ClaimMappingTable {
        entries: entries.into_iter().collect(),
    }
}
