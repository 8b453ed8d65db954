use crate::substitution::resolver::SubstitutionBindings;
use chrono::{DateTime, SecondsFormat};

/// Values that are derived rather than looked up. Unknown names yield `None`.
pub fn calculate(name: &str, bindings: &SubstitutionBindings<'_>) -> Option<String> {
    match name {
        "Moodle.Person.userGroupIds" => Some(bindings.user.group_ids.join(",")),
        "Context.id.history" => Some(bindings.course.history_ids.join(",")),
        "CourseSection.timeFrame.begin" => Some(format_timestamp(bindings.course.startdate)),
        "CourseSection.timeFrame.end" => Some(format_timestamp(bindings.course.enddate)),
        _ => None,
    }
}

/// RFC 3339 in UTC with an explicit `+00:00` offset; empty when unset.
fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .filter(|ts| *ts != 0)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, false))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::calculate;
    use crate::model::{LaunchCourse, LaunchUser};
    use crate::substitution::resolver::SubstitutionBindings;

    #[test]
    fn calculates_course_dates_and_memberships() {
        let mut user = LaunchUser::new("3");
        user.group_ids = vec!["7".to_string(), "9".to_string()];
        let mut course = LaunchCourse::new("2");
        course.startdate = Some(1_704_067_200);
        course.history_ids = vec!["1".to_string()];
        let bindings = SubstitutionBindings {
            user: &user,
            course: &course,
        };
        assert_eq!(
            calculate("CourseSection.timeFrame.begin", &bindings).as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
        assert_eq!(
            calculate("CourseSection.timeFrame.end", &bindings).as_deref(),
            Some("")
        );
        assert_eq!(
            calculate("Moodle.Person.userGroupIds", &bindings).as_deref(),
            Some("7,9")
        );
        assert_eq!(calculate("Context.id.history", &bindings).as_deref(), Some("1"));
        assert_eq!(calculate("Unknown.value", &bindings), None);
    }
}
