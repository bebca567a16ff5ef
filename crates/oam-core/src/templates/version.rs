//! CLI / template version compatibility

use semver::Version;
use std::fmt;

/// The running CLI is older than the version a template was written for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionWarning {
    pub required: Version,
    pub running: Version,
    pub upgrade_command: String,
}

impl VersionWarning {
    /// Single-line form for prompt logs
    pub fn summary(&self) -> String {
        format!(
            "template expects oam {} or newer, you have {} (upgrade: {})",
            self.required, self.running, self.upgrade_command
        )
    }
}

impl fmt::Display for VersionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "This template was designed for CLI version {} or newer.",
            self.required
        )?;
        writeln!(f, "You are running version {}.", self.running)?;
        write!(f, "Consider updating: {}", self.upgrade_command)
    }
}

/// `None` when compatible or when either version cannot be parsed
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<VersionWarning> {
    let running = parse_version(cli_version)?;
    let required = parse_version(template_version)?;

    (running < required).then(|| VersionWarning {
        required,
        running,
        upgrade_command: upgrade_command.to_string(),
    })
}

fn parse_version(raw: &str) -> Option<Version> {
    let raw = raw.trim();
    Version::parse(raw.strip_prefix('v').unwrap_or(raw)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install oam-cli --force";

    #[test]
    fn test_older_cli_warns() {
        let warning = check_compatibility("0.1.0", "0.2.0", UPGRADE).unwrap();
        assert_eq!(warning.required, Version::new(0, 2, 0));
        assert!(warning.summary().contains("0.2.0 or newer, you have 0.1.0"));
        assert!(warning.to_string().ends_with(UPGRADE));
    }

    #[test]
    fn test_same_or_newer_cli_is_fine() {
        assert!(check_compatibility("0.1.0", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.2.0", "0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_leading_v_accepted() {
        assert!(check_compatibility("0.1.0", "v0.3.0", UPGRADE).is_some());
    }

    #[test]
    fn test_unparsable_versions_never_warn() {
        assert!(check_compatibility("invalid", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.1.0", "", UPGRADE).is_none());
    }
}
