use crate::errors::LaunchError;
use crate::model::{LaunchCourse, ParameterMap, ResourceLink};
use crate::resolvers::ParameterResolver;
use crate::utils::text::html_to_text;

/// Course and resource-link identity.
pub struct ContextResolver<'a> {
    course: &'a LaunchCourse,
    link: &'a ResourceLink,
}

impl<'a> ContextResolver<'a> {
    pub fn new(course: &'a LaunchCourse, link: &'a ResourceLink) -> Self {
        Self { course, link }
    }
}

impl ParameterResolver for ContextResolver<'_> {
    fn name(&self) -> &'static str {
        "context"
    }

    fn resolve(&self, mut params: ParameterMap) -> Result<ParameterMap, LaunchError> {
        params.insert("context_id", &self.course.id);
        params.insert("context_label", html_to_text(&self.course.shortname));
        params.insert("context_title", html_to_text(&self.course.fullname));
        if self.course.is_site() {
            params.insert("context_type", "Group");
        } else {
            params.insert("context_type", "CourseSection");
            params.insert("lis_course_section_sourcedid", &self.course.idnumber);
        }
        params.insert_non_empty("resource_link_id", &self.link.id);
        params.insert_non_empty("resource_link_title", html_to_text(&self.link.title));
        params.insert_non_empty("resource_link_description", html_to_text(&self.link.text));
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_courses_are_groups_without_sourcedid() {
        let mut course = LaunchCourse::new("1");
        course.format = "site".to_string();
        let link = ResourceLink::new("5", "1", "4");
        let params = ContextResolver::new(&course, &link)
            .resolve(ParameterMap::new())
            .unwrap();
        assert_eq!(params.get_text("context_type").as_deref(), Some("Group"));
        assert!(!params.contains_key("lis_course_section_sourcedid"));
        assert!(!params.contains_key("resource_link_title"));
    }

    #[test]
    fn course_names_are_plain_text() {
        let mut course = LaunchCourse::new("2");
        course.shortname = "<b>RUST101</b>".to_string();
        course.fullname = "Rust &amp; friends".to_string();
        course.idnumber = "R-101".to_string();
        let mut link = ResourceLink::new("5", "2", "4");
        link.title = "Quiz <i>one</i>".to_string();
        let params = ContextResolver::new(&course, &link)
            .resolve(ParameterMap::new())
            .unwrap();
        assert_eq!(params.get_text("context_label").as_deref(), Some("RUST101"));
        assert_eq!(params.get_text("context_title").as_deref(), Some("Rust & friends"));
        assert_eq!(params.get_text("context_type").as_deref(), Some("CourseSection"));
        assert_eq!(
            params.get_text("lis_course_section_sourcedid").as_deref(),
            Some("R-101")
        );
        assert_eq!(params.get_text("resource_link_id").as_deref(), Some("5"));
        assert_eq!(params.get_text("resource_link_title").as_deref(), Some("Quiz one"));
    }
}
