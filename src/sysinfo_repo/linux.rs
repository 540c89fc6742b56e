// Linux-specific helpers: /etc/os-release.

/// Read the distribution's display name from /etc/os-release (Linux).
/// Prefers PRETTY_NAME, then NAME.
pub(super) fn read_os_pretty_name_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        return parse_os_release(&content);
    }
    #[cfg(not(target_os = "linux"))]
    None
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(super) fn parse_os_release(content: &str) -> Option<String> {
    for key in ["PRETTY_NAME=", "NAME="] {
        if let Some(v) = content
            .lines()
            .find_map(|line| line.strip_prefix(key))
            .map(|v| v.trim().trim_matches('"'))
            && !v.is_empty()
        {
            return Some(v.to_string());
        }
    }
    None
}
