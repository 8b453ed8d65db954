use crate::utils::html::MarkupEscaper;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An outbound launch: where to POST and what to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    url: String,
    parameters: IndexMap<String, String>,
}

impl Message {
    pub fn new(url: impl Into<String>, parameters: IndexMap<String, String>) -> Self {
        Self {
            url: url.into(),
            parameters,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// Self-submitting HTML form. Every name and value goes through `escaper`.
    pub fn render_form(&self, escaper: &dyn MarkupEscaper) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n");
        html.push_str(&format!(
            "<form id=\"ltiLaunchForm\" name=\"ltiLaunchForm\" method=\"post\" action=\"{}\" encType=\"application/x-www-form-urlencoded\">\n",
            escaper.escape(&self.url)
        ));
        for (name, value) in &self.parameters {
            html.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\"/>\n",
                escaper.escape(name),
                escaper.escape(value)
            ));
        }
        html.push_str("</form>\n");
        html.push_str("<script>document.getElementById(\"ltiLaunchForm\").submit();</script>\n");
        html.push_str("</body>\n</html>\n");
        html
    }
}
