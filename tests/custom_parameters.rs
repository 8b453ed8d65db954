mod common;
use common::{options, Fixture};

use lti_launch::model::{LaunchCourse, LaunchUser, ParameterMap};
use lti_launch::substitution::{
    AllowList, CustomParameterParser, SubstitutionBindings, SubstitutionDictionary,
    SubstitutionResolver,
};
use std::sync::Arc;

fn parse(raw: &str, source: &ParameterMap) -> ParameterMap {
    let mut user = LaunchUser::new("3");
    user.username = "ada".to_string();
    user.group_ids = vec!["12".to_string(), "7".to_string()];
    let course = LaunchCourse::new("2");
    let dictionary = SubstitutionDictionary::standard();
    let bindings = SubstitutionBindings {
        user: &user,
        course: &course,
    };
    CustomParameterParser::new(SubstitutionResolver::new(&dictionary, bindings, source))
        .parse(raw)
        .unwrap()
}

#[test]
fn escaped_values_drop_one_marker_only() {
    let source: ParameterMap = [("user_id", "3")].into_iter().collect();
    let parsed = parse("a=\\$User.id;b=\\\\$User.id\nc=\\plain", &source);
    assert_eq!(parsed.get_text("custom_a").as_deref(), Some("$User.id"));
    assert_eq!(parsed.get_text("custom_b").as_deref(), Some("\\$User.id"));
    assert_eq!(parsed.get_text("custom_c").as_deref(), Some("plain"));
}

#[test]
fn dictionary_tokens_round_trip_source_values() {
    let source: ParameterMap = [("user_id", "3"), ("context_title", "Biology & Co")]
        .into_iter()
        .collect();
    let parsed = parse(
        "uid=$User.id\ntitle=$Context.title\nmissing=$Context.label\nuser=$User.username\ngroups=$Moodle.Person.userGroupIds",
        &source,
    );
    assert_eq!(parsed.get_text("custom_uid").as_deref(), Some("3"));
    assert_eq!(parsed.get_text("custom_title").as_deref(), Some("Biology & Co"));
    assert_eq!(parsed.get_text("custom_missing").as_deref(), Some("$Context.label"));
    assert_eq!(parsed.get_text("custom_user").as_deref(), Some("ada"));
    assert_eq!(parsed.get_text("custom_groups").as_deref(), Some("12,7"));
}

#[test]
fn malformed_entries_are_skipped() {
    let parsed = parse("novalue\n=orphan\n a = b \n\n", &ParameterMap::new());
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.get_text("custom_a").as_deref(), Some("b"));
}

#[test]
fn service_resolves_custom_parameters_only() {
    let mut fixture = Fixture::new();
    fixture.tool.custom_parameters = "who=$User.id\nsection=$CourseSection.sourcedId".to_string();
    fixture.link.custom_parameters = "who=link".to_string();
    let custom = fixture
        .service()
        .resolve_custom_parameters("5", "3", options())
        .unwrap();
    assert_eq!(custom.get_text("custom_who").as_deref(), Some("link"));
    assert_eq!(custom.get_text("custom_section").as_deref(), Some("BIO-2024"));
    assert!(custom.keys().all(|key| key.starts_with("custom_")));
}

#[test]
fn allow_list_limits_substitution() {
    let mut fixture = Fixture::new();
    fixture.tool.custom_parameters = "ctx=$Context.id\nwho=$User.id".to_string();
    let service = fixture
        .service()
        .with_policy(Arc::new(AllowList::new(["Context.id"])));
    let custom = service
        .resolve_custom_parameters("5", "3", options())
        .unwrap();
    assert_eq!(custom.get_text("custom_ctx").as_deref(), Some("2"));
    assert_eq!(custom.get_text("custom_who").as_deref(), Some("$User.id"));
}
