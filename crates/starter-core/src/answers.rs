//! User answers that drive a generation run

use crate::deps::FeatureFlags;
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything the generator needs to know about the project being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    /// Lowercase application name without spaces
    pub app_name: String,
    pub description: String,
    /// Include the client-side framework
    pub client: bool,
    /// Develop and deploy inside Docker
    pub docker: bool,
    /// Add the multi-service Docker layout (only with `docker`)
    pub multiservice: bool,
}

impl Answers {
    pub fn new(app_name: &str, description: &str, client: bool, docker: bool, multiservice: bool) -> Self {
        Self {
            app_name: normalize_app_name(app_name),
            description: description.to_string(),
            client,
            docker,
            multiservice: docker && multiservice,
        }
    }

    pub fn feature_flags(&self) -> FeatureFlags {
        FeatureFlags {
            container_mode: self.docker,
            client_enabled: self.client,
        }
    }

    /// Where application files go. Docker builds live in a subdirectory named after the app.
    pub fn app_destination(&self, root: &Path) -> PathBuf {
        if self.docker {
            root.join(&self.app_name)
        } else {
            root.to_path_buf()
        }
    }

    /// Variables available to rendered templates
    pub fn render_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("appname".to_string(), self.app_name.clone()),
            ("description".to_string(), self.description.clone()),
            ("client".to_string(), self.client.to_string()),
            ("docker".to_string(), self.docker.to_string()),
            ("multiservice".to_string(), self.multiservice.to_string()),
        ])
    }
}

/// Lowercase the name and replace whitespace with dashes
pub fn normalize_app_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Normalize the name and reject anything that can't be used as a single directory name
pub fn validate_app_name(raw: &str) -> Result<String> {
    let name = normalize_app_name(raw);
    if name.is_empty() {
        bail!("Application name must not be empty");
    }
    if name.contains(['/', '\\']) {
        bail!("Application name `{}` must not contain path separators", name);
    }
    if name == "." || name == ".." {
        bail!("Application name `{}` is not a valid directory name", name);
    }
    Ok(name)
}

/// Default app name: the destination directory's own name
pub fn default_app_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| normalize_app_name(&n.to_string_lossy()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "app".to_string())
}
