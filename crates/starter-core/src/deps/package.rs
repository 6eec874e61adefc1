//! Rewriting the template's package.json for a generated project

use super::assemble::{assemble, FeatureFlags, FinalManifest};
use super::classify::{Classifier, DependencyGroups};
use super::DependencyMap;
use crate::answers::Answers;
use crate::error::ManifestError;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

/// A package.json document. Keys keep their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Parse and validate a package.json document
    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content)?;
        let document = match value {
            Value::Object(map) => map,
            _ => return Err(ManifestError::NotAnObject),
        };

        let manifest = Self { document };
        // both sections must be name -> version string maps
        manifest.section(DEPENDENCIES)?;
        manifest.section(DEV_DEPENDENCIES)?;
        Ok(manifest)
    }

    /// Read the source manifest from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid package manifest {}", path.display()))
    }

    /// A dependency section as a sorted map; a missing section is empty
    fn section(&self, key: &str) -> Result<DependencyMap, ManifestError> {
        let Some(value) = self.document.get(key) else {
            return Ok(DependencyMap::new());
        };
        let Value::Object(entries) = value else {
            return Err(ManifestError::SectionNotAnObject {
                section: key.to_string(),
            });
        };

        entries
            .iter()
            .map(|(name, version)| match version {
                Value::String(v) => Ok((name.clone(), v.clone())),
                _ => Err(ManifestError::VersionNotAString {
                    section: key.to_string(),
                    package: name.clone(),
                }),
            })
            .collect()
    }

    /// Runtime dependencies as declared in the source
    pub fn runtime_dependencies(&self) -> Result<DependencyMap, ManifestError> {
        self.section(DEPENDENCIES)
    }

    /// Auxiliary (dev) dependencies as declared in the source
    pub fn auxiliary_dependencies(&self) -> Result<DependencyMap, ManifestError> {
        self.section(DEV_DEPENDENCIES)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.document.get(key).and_then(Value::as_str)
    }

    /// Set a top-level key, keeping its position if it already exists
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.document.insert(key.to_string(), value.into());
    }

    fn set_section(&mut self, key: &str, deps: &DependencyMap) -> Result<()> {
        let value = serde_json::to_value(deps).context("Failed to serialize dependencies")?;
        self.set(key, value);
        Ok(())
    }

    /// Classify and reassemble the dependency sections for the given answers.
    ///
    /// In container mode, `docker_dependencies` are added to the runtime
    /// section unless the template already declares them.
    pub fn assemble_for(
        &mut self,
        answers: &Answers,
        classifier: &Classifier,
        docker_dependencies: &DependencyMap,
    ) -> Result<AssembledPackage> {
        self.set("name", answers.app_name.as_str());
        self.set("description", answers.description.as_str());

        let runtime = self.runtime_dependencies()?;
        let groups = classifier.classify(&self.auxiliary_dependencies()?);
        let flags = answers.feature_flags();
        let mut manifest = assemble(&runtime, &groups, flags);

        if flags.container_mode {
            for (name, version) in docker_dependencies {
                if !manifest.dependencies.contains_key(name) {
                    tracing::debug!(package = %name, %version, "adding container dependency");
                    manifest
                        .dependencies
                        .insert(name.clone(), version.clone());
                }
            }
        }

        self.set_section(DEPENDENCIES, &manifest.dependencies)?;
        self.set_section(DEV_DEPENDENCIES, &manifest.dev_dependencies)?;

        Ok(AssembledPackage {
            groups,
            flags,
            manifest,
        })
    }

    /// Serialize with 4-space indentation and a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document
            .serialize(&mut serializer)
            .context("Failed to serialize package manifest")?;
        buf.push(b'\n');
        String::from_utf8(buf).context("Serialized package manifest is not UTF-8")
    }

    /// Write the manifest as `package.json` in `dir`
    pub async fn write_to(&self, dir: &Path) -> Result<std::path::PathBuf> {
        let path = dir.join("package.json");
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        tokio::fs::write(&path, self.to_pretty_json()?)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(path)
    }
}

/// What `assemble_for` decided, kept for reporting
#[derive(Debug, Clone)]
pub struct AssembledPackage {
    pub groups: DependencyGroups,
    pub flags: FeatureFlags,
    pub manifest: FinalManifest,
}
