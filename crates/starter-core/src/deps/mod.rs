//! Dependency classification and manifest assembly
//!
//! This module provides:
//! - Classification of auxiliary dependencies into server/client/buildTool/test groups
//! - Assembly of the final runtime and dev sections from those groups
//! - Rewriting the template's package.json for a generated project

pub mod assemble;
pub mod classify;
pub mod package;

use std::collections::BTreeMap;

/// Package name -> version specifier, iterated in ascending name order
pub type DependencyMap = BTreeMap<String, String>;

pub use assemble::{assemble, FeatureFlags, FinalManifest};
pub use classify::{classify, ClassificationRule, Classifier, DependencyCategory, DependencyGroups};
pub use package::{AssembledPackage, PackageManifest};
