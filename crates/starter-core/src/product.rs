//! Generator configuration trait for CLI binaries
//!
//! Each generator binary implements this trait to describe its identity,
//! where its templates live, and what to tell the user once a project exists.

use crate::answers::Answers;
use std::path::{Path, PathBuf};

/// Configuration trait for a generator product
pub trait GeneratorConfig: Clone + Send + Sync + 'static {
    /// Internal name (used for the defaults file and env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template directory shipped with the binary
    fn bundled_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Instructions shown after the project has been generated
    fn next_steps(&self, dir: &Path, answers: &Answers) -> Vec<String>;

    /// File name for stored prompt defaults, relative to the home directory
    fn defaults_file_name(&self) -> String {
        format!(".{}.yaml", self.name())
    }

    /// Template directory: explicit path, then the env override, then the bundled one
    fn resolve_template_dir(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        std::env::var_os(self.template_dir_env())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.bundled_template_dir())
    }
}
