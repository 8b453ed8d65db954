pub fn is_truthy(value: impl AsRef<str>) -> bool {
    matches!(
        value.as_ref().trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn env_flag(keys: &[&str]) -> Option<bool> {
    keys.iter()
        .find_map(|key| std::env::var(key).ok())
        .map(is_truthy)
}

pub fn is_force_ssl_enabled() -> Option<bool> {
    env_flag(&["LTI_FORCE_SSL"])
}

#[cfg(test)]
mod tests {
    use super::is_truthy;

    #[test]
    fn truthy_values() {
        for value in ["1", "true", " YES ", "on"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["0", "false", "", "enabled"] {
            assert!(!is_truthy(value), "{value} should not be truthy");
        }
    }
}
