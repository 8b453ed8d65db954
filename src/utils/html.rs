/// Escapes text for use inside HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Markup escaping used when a message is rendered for delivery.
pub trait MarkupEscaper {
    fn escape(&self, value: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl MarkupEscaper for HtmlEscaper {
    fn escape(&self, value: &str) -> String {
        escape_html(value)
    }
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
