//! Version comparison between the CLI and the template set

use semver::Version;

/// Parse a version, tolerating a leading `v`
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)).ok()
}

/// Warning text when the templates expect a newer CLI.
/// Unparsable versions can't be compared and produce no warning.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = parse_version(cli_version)?;
    let template = parse_version(template_version)?;

    (cli < template).then(|| {
        format!(
            "These templates were written for version {} or newer; you are running {}.\n\
             Consider updating: {}",
            template, cli, upgrade_command
        )
    })
}
