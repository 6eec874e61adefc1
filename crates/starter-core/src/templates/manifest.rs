//! Template manifest types and parsing

use crate::answers::Answers;
use crate::deps::{Classifier, DependencyMap};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the manifest file at the root of a template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// A condition on the user's answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Client,
    NoClient,
    Docker,
    NoDocker,
    Multiservice,
}

impl Condition {
    pub fn holds(&self, answers: &Answers) -> bool {
        match self {
            Condition::Client => answers.client,
            Condition::NoClient => !answers.client,
            Condition::Docker => answers.docker,
            Condition::NoDocker => !answers.docker,
            Condition::Multiservice => answers.multiservice,
        }
    }
}

/// Which directory a step writes into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The application directory (a subdirectory in docker mode)
    #[default]
    App,
    /// The destination root
    Root,
}

impl Target {
    pub fn resolve(&self, root: &Path, answers: &Answers) -> std::path::PathBuf {
        match self {
            Target::App => answers.app_destination(root),
            Target::Root => root.to_path_buf(),
        }
    }
}

fn all_hold(conditions: &[Condition], answers: &Answers) -> bool {
    conditions.iter().all(|c| c.holds(answers))
}

/// Copy every file under `source` matching `pattern`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyStep {
    /// Directory relative to the template root
    pub source: String,

    /// Glob relative to `source`
    pub pattern: String,

    #[serde(default)]
    pub target: Target,

    /// Substitute answer values into the file contents
    #[serde(default)]
    pub render: bool,

    /// All conditions must hold for the step to run
    #[serde(default)]
    pub when: Vec<Condition>,
}

impl CopyStep {
    pub fn applies(&self, answers: &Answers) -> bool {
        all_hold(&self.when, answers)
    }
}

/// Delete a file that an earlier copy step produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveStep {
    /// Path relative to the target directory
    pub path: String,

    #[serde(default)]
    pub target: Target,

    #[serde(default)]
    pub when: Vec<Condition>,
}

impl RemoveStep {
    pub fn applies(&self, answers: &Answers) -> bool {
        all_hold(&self.when, answers)
    }
}

/// Root template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Source package.json, relative to the template root
    pub package_manifest: String,

    /// Copy steps, applied in order
    pub steps: Vec<CopyStep>,

    /// Removal steps, applied after all copies
    #[serde(default)]
    pub remove: Vec<RemoveStep>,

    /// Runtime dependencies added in docker mode unless already declared
    #[serde(default)]
    pub docker_dependencies: DependencyMap,

    /// Overrides the built-in dependency classification table
    #[serde(default)]
    pub classification: Option<Classifier>,
}

impl TemplateManifest {
    /// Read `template.yaml` from a template directory
    pub async fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(MANIFEST_FILE);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Classifier to use for this template
    pub fn classifier(&self) -> Classifier {
        self.classification.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::DependencyCategory;

    const MANIFEST: &str = r#"
name: MEAN2 Starter
description: Server with optional Angular2 client
version: 0.1.0
package_manifest: mean2-starter/package.json
steps:
  - source: mean2-starter
    pattern: "*.*"
  - source: docker
    pattern: "*"
    render: true
    when: [docker]
  - source: multiservice
    pattern: "**"
    target: root
    render: true
    when: [multiservice]
remove:
  - path: config/client-assets.js
    when: [no_client]
docker_dependencies:
  aws-sdk: ^2.7.1
  var: ^0.2.0
"#;

    fn answers(client: bool, docker: bool, multiservice: bool) -> Answers {
        Answers::new("app", "", client, docker, multiservice)
    }

    #[test]
    fn test_parse_manifest() {
        let manifest: TemplateManifest = serde_yaml::from_str(MANIFEST).unwrap();

        assert_eq!(manifest.name, "MEAN2 Starter");
        assert_eq!(manifest.steps.len(), 3);
        assert_eq!(manifest.steps[0].target, Target::App);
        assert!(!manifest.steps[0].render);
        assert_eq!(manifest.steps[2].target, Target::Root);
        assert_eq!(manifest.remove[0].when, vec![Condition::NoClient]);
        assert_eq!(manifest.docker_dependencies["aws-sdk"], "^2.7.1");
        assert!(manifest.classification.is_none());
        assert_eq!(manifest.classifier(), Classifier::default());
    }

    #[test]
    fn test_step_conditions() {
        let manifest: TemplateManifest = serde_yaml::from_str(MANIFEST).unwrap();
        let docker_step = &manifest.steps[1];
        let multi_step = &manifest.steps[2];
        let remove = &manifest.remove[0];

        assert!(manifest.steps[0].applies(&answers(false, false, false)));
        assert!(!docker_step.applies(&answers(true, false, false)));
        assert!(docker_step.applies(&answers(true, true, false)));
        assert!(!multi_step.applies(&answers(true, true, false)));
        assert!(multi_step.applies(&answers(true, true, true)));
        // multiservice is forced off without docker
        assert!(!multi_step.applies(&answers(true, false, true)));
        assert!(remove.applies(&answers(false, false, false)));
        assert!(!remove.applies(&answers(true, false, false)));
    }

    #[test]
    fn test_target_resolution() {
        let root = Path::new("/out");
        let docker = Answers::new("svc", "", true, true, false);

        assert_eq!(Target::App.resolve(root, &docker), Path::new("/out/svc"));
        assert_eq!(Target::Root.resolve(root, &docker), Path::new("/out"));
    }

    #[test]
    fn test_classification_override() {
        let yaml = format!(
            "{}classification:\n  rules:\n    - keywords: [jest]\n      category: test\n  fallback: server\n",
            MANIFEST
        );
        let manifest: TemplateManifest = serde_yaml::from_str(&yaml).unwrap();
        let classifier = manifest.classifier();

        assert_eq!(classifier.categorize("jest"), DependencyCategory::Test);
        assert_eq!(classifier.categorize("gulp"), DependencyCategory::Server);
    }

    #[tokio::test]
    async fn test_load_from_template_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateManifest::load(dir.path()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));

        tokio::fs::write(dir.path().join(MANIFEST_FILE), MANIFEST)
            .await
            .unwrap();
        let manifest = TemplateManifest::load(dir.path()).await.unwrap();
        assert_eq!(manifest.steps.len(), 3);

        tokio::fs::write(dir.path().join(MANIFEST_FILE), "steps: {")
            .await
            .unwrap();
        let err = TemplateManifest::load(dir.path()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
