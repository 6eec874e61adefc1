//! Answers remembered between runs
//!
//! The defaults file is read once before prompting and written once after a
//! successful generation. Nothing else touches it.

use crate::answers::Answers;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Prompt defaults persisted across runs. `multiservice` is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<bool>,
}

impl StoredDefaults {
    /// Load defaults; a missing file means nothing has been stored yet
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stored defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse stored defaults {}", path.display()))
    }

    /// Write defaults, creating parent directories as needed
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize defaults")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "stored defaults");
        Ok(())
    }

    pub fn from_answers(answers: &Answers) -> Self {
        Self {
            app_name: Some(answers.app_name.clone()),
            description: Some(answers.description.clone()),
            client: Some(answers.client),
            docker: Some(answers.docker),
        }
    }

    /// Replace stored values with the ones just chosen
    pub fn remember(&mut self, answers: &Answers) {
        *self = Self::from_answers(answers);
    }
}

/// `$HOME/<file_name>` (or `%USERPROFILE%`), if a home directory is known
pub fn default_defaults_path(file_name: &str) -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(file_name))
}
