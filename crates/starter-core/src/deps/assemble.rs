//! Merging classified groups into the final runtime and dev sections

use super::classify::DependencyGroups;
use super::DependencyMap;
use serde::Serialize;

/// Answers that decide where each group ends up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Build runs inside a container image, so build tools are runtime dependencies
    pub container_mode: bool,
    /// A client framework is part of the generated project
    pub client_enabled: bool,
}

/// The two dependency sections written to the output manifest.
/// Keys are always in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FinalManifest {
    pub dependencies: DependencyMap,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: DependencyMap,
}

/// Last writer wins on key collision
fn merge_into(target: &mut DependencyMap, source: &DependencyMap) {
    target.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
}

/// Build the final manifest from the runtime set and the classified auxiliary groups
pub fn assemble(
    runtime: &DependencyMap,
    groups: &DependencyGroups,
    flags: FeatureFlags,
) -> FinalManifest {
    let mut manifest = FinalManifest {
        dependencies: runtime.clone(),
        dev_dependencies: groups.test.clone(),
    };
    merge_into(&mut manifest.dependencies, &groups.server);

    let section = if flags.container_mode {
        &mut manifest.dependencies
    } else {
        &mut manifest.dev_dependencies
    };

    merge_into(section, &groups.build_tool);
    if flags.client_enabled {
        merge_into(section, &groups.client);
    }

    tracing::debug!(
        dependencies = manifest.dependencies.len(),
        dev_dependencies = manifest.dev_dependencies.len(),
        container_mode = flags.container_mode,
        client_enabled = flags.client_enabled,
        "assembled dependency manifest"
    );

    manifest
}
