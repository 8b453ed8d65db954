use serde::{Deserialize, Serialize};

/// The acting user of a launch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchUser {
    pub id: String,
    pub username: String,
    pub idnumber: String,
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub timezone: String,
    pub phone1: String,
    pub phone2: String,
    pub url: String,
    pub group_ids: Vec<String>,
    pub is_instructor: bool,
    pub is_site_admin: bool,
}

impl LaunchUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname.trim(), self.lastname.trim())
            .trim()
            .to_string()
    }

    /// Named attribute lookup used by `User.*` substitutions.
    pub fn attribute(&self, field: &str) -> Option<String> {
        let value = match field {
            "id" => &self.id,
            "username" => &self.username,
            "idnumber" => &self.idnumber,
            "firstname" => &self.firstname,
            "middlename" => &self.middlename,
            "lastname" => &self.lastname,
            "email" => &self.email,
            "address" => &self.address,
            "city" => &self.city,
            "country" => &self.country,
            "timezone" => &self.timezone,
            "phone1" => &self.phone1,
            "phone2" => &self.phone2,
            "url" => &self.url,
            _ => return None,
        };
        Some(value.clone())
    }
}

/// The course-like context a tool is launched from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchCourse {
    pub id: String,
    pub shortname: String,
    pub fullname: String,
    pub idnumber: String,
    pub summary: String,
    pub format: String,
    pub startdate: Option<i64>,
    pub enddate: Option<i64>,
    pub history_ids: Vec<String>,
}

impl LaunchCourse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            format: "topics".to_string(),
            ..Self::default()
        }
    }

    pub fn is_site(&self) -> bool {
        self.format == crate::constants::consumer::SITE_COURSE_FORMAT
    }

    pub fn attribute(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "shortname" => Some(self.shortname.clone()),
            "fullname" => Some(self.fullname.clone()),
            "idnumber" => Some(self.idnumber.clone()),
            "summary" => Some(self.summary.clone()),
            "format" => Some(self.format.clone()),
            "startdate" => Some(self.startdate.map(|ts| ts.to_string()).unwrap_or_default()),
            "enddate" => Some(self.enddate.map(|ts| ts.to_string()).unwrap_or_default()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LaunchCourse, LaunchUser};

    #[test]
    fn full_name_trims_missing_parts() {
        let mut user = LaunchUser::new("3");
        user.firstname = "Ada".to_string();
        assert_eq!(user.full_name(), "Ada");
        user.lastname = "Lovelace".to_string();
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn unknown_attributes_are_none() {
        let user = LaunchUser::new("3");
        assert_eq!(user.attribute("username").as_deref(), Some(""));
        assert!(user.attribute("password").is_none());
        let course = LaunchCourse::new("2");
        assert_eq!(course.attribute("startdate").as_deref(), Some(""));
        assert!(!course.is_site());
    }
}
