//! Typed errors for malformed template inputs

use thiserror::Error;

/// The source package manifest does not have the expected shape
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("package manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("package manifest must be a JSON object")]
    NotAnObject,

    #[error("`{section}` must be an object mapping package names to versions")]
    SectionNotAnObject { section: String },

    #[error("`{section}.{package}` must be a version string")]
    VersionNotAString { section: String, package: String },
}

/// A template file could not be rendered
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown template variable `{name}` on line {line}")]
    UnknownVariable { name: String, line: usize },

    #[error("unterminated template tag on line {line}")]
    Unterminated { line: usize },
}
