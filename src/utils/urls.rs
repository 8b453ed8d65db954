use url::Url;

/// Forces the `https` scheme, adding it to scheme-less URLs.
pub fn ensure_url_is_https(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.contains("://") {
        return format!("https://{}", trimmed);
    }
    let is_http = trimmed
        .get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"));
    match trimmed.get(7..) {
        Some(rest) if is_http => format!("https://{}", rest),
        _ => trimmed.to_string(),
    }
}

/// Adds `http://` to scheme-less URLs.
pub fn ensure_url_has_scheme(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains("://") {
        return trimmed.to_string();
    }
    format!("http://{}", trimmed)
}

/// Splits a URL into its query-less form and decoded query pairs.
pub fn split_query(raw: &str) -> Option<(String, Vec<(String, String)>)> {
    let mut parsed = Url::parse(raw).ok()?;
    let pairs = parsed
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some((parsed.to_string(), pairs))
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_https_rewrites_http_and_bare_hosts() {
        assert_eq!(ensure_url_is_https("http://a.test/x"), "https://a.test/x");
        assert_eq!(ensure_url_is_https("HTTP://a.test"), "https://a.test");
        assert_eq!(ensure_url_is_https("a.test/x"), "https://a.test/x");
        assert_eq!(ensure_url_is_https("https://a.test"), "https://a.test");
    }

    #[test]
    fn ensure_https_keeps_multibyte_urls_intact() {
        assert_eq!(
            ensure_url_is_https("abcdefé/back?next=http://lms.test"),
            "abcdefé/back?next=http://lms.test"
        );
        assert_eq!(ensure_url_is_https("http://é.test/ü"), "https://é.test/ü");
        assert_eq!(ensure_url_is_https("ftp://é"), "ftp://é");
    }

    #[test]
    fn split_query_extracts_pairs() {
        let (base, pairs) = split_query("https://a.test/launch?x=1&y=a%20b#frag").unwrap();
        assert_eq!(base, "https://a.test/launch");
        assert_eq!(
            pairs,
            vec![
                ("x".to_string(), "1".to_string()),
                ("y".to_string(), "a b".to_string())
            ]
        );
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("https://lms.test/", "/mod/lti/service.php"), "https://lms.test/mod/lti/service.php");
    }
}
