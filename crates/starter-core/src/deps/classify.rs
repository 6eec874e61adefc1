//! Dependency classification by ordered substring rules

use super::DependencyMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group a dependency is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyCategory {
    Server,
    Client,
    #[serde(alias = "build_tool")]
    BuildTool,
    Test,
}

impl DependencyCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            DependencyCategory::Server => "server",
            DependencyCategory::Client => "client",
            DependencyCategory::BuildTool => "buildTool",
            DependencyCategory::Test => "test",
        }
    }
}

impl fmt::Display for DependencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the rule table: any keyword contained in a package name selects the category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub keywords: Vec<String>,
    pub category: DependencyCategory,
}

impl ClassificationRule {
    pub fn new(keywords: &[&str], category: DependencyCategory) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category,
        }
    }

    /// Case-sensitive substring match against the package name
    pub fn matches(&self, package: &str) -> bool {
        self.keywords.iter().any(|k| package.contains(k.as_str()))
    }
}

const TEST_KEYWORDS: &[&str] = &[
    "mocha",
    "chai",
    "karma",
    "jasmine",
    "istanbul",
    "sinon",
    "supertest",
    "protractor",
    "should",
];

const CLIENT_TOOL_KEYWORDS: &[&str] = &[
    "sass",
    "sourcemaps",
    "uglify",
    "lint",
    "livereload",
    "cssmin",
    "imagemin",
];

const BUILD_TOOL_KEYWORDS: &[&str] = &["gulp", "grunt", "run-sequence"];

/// Dependencies partitioned into the four groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGroups {
    pub server: DependencyMap,
    pub client: DependencyMap,
    #[serde(rename = "buildTool")]
    pub build_tool: DependencyMap,
    pub test: DependencyMap,
}

impl DependencyGroups {
    pub fn group(&self, category: DependencyCategory) -> &DependencyMap {
        match category {
            DependencyCategory::Server => &self.server,
            DependencyCategory::Client => &self.client,
            DependencyCategory::BuildTool => &self.build_tool,
            DependencyCategory::Test => &self.test,
        }
    }

    fn group_mut(&mut self, category: DependencyCategory) -> &mut DependencyMap {
        match category {
            DependencyCategory::Server => &mut self.server,
            DependencyCategory::Client => &mut self.client,
            DependencyCategory::BuildTool => &mut self.build_tool,
            DependencyCategory::Test => &mut self.test,
        }
    }

    /// Total number of classified dependencies across all groups
    pub fn len(&self) -> usize {
        self.server.len() + self.client.len() + self.build_tool.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered rule table with a fallback category. First matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifier {
    pub rules: Vec<ClassificationRule>,
    #[serde(default = "default_fallback")]
    pub fallback: DependencyCategory,
}

fn default_fallback() -> DependencyCategory {
    DependencyCategory::Client
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: vec![
                ClassificationRule::new(TEST_KEYWORDS, DependencyCategory::Test),
                ClassificationRule::new(CLIENT_TOOL_KEYWORDS, DependencyCategory::Client),
                ClassificationRule::new(BUILD_TOOL_KEYWORDS, DependencyCategory::BuildTool),
            ],
            fallback: default_fallback(),
        }
    }
}

impl Classifier {
    pub fn new(rules: Vec<ClassificationRule>, fallback: DependencyCategory) -> Self {
        Self { rules, fallback }
    }

    /// Category for a single package name
    pub fn categorize(&self, package: &str) -> DependencyCategory {
        self.rules
            .iter()
            .find(|rule| rule.matches(package))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }

    /// Partition `auxiliary` into groups; every entry lands in exactly one group
    pub fn classify(&self, auxiliary: &DependencyMap) -> DependencyGroups {
        let mut groups = DependencyGroups::default();
        for (name, version) in auxiliary {
            let category = self.categorize(name);
            tracing::debug!(package = %name, %category, "classified dependency");
            groups
                .group_mut(category)
                .insert(name.clone(), version.clone());
        }
        groups
    }
}

/// Classify with the built-in rule table
pub fn classify(auxiliary: &DependencyMap) -> DependencyGroups {
    Classifier::default().classify(auxiliary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> DependencyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reference_example() {
        let aux = map(&[
            ("mocha", "^3.0.0"),
            ("gulp-sass", "^2.0.0"),
            ("gulp", "^3.9.0"),
            ("lodash", "^4.0.0"),
        ]);

        let groups = classify(&aux);

        assert_eq!(groups.test, map(&[("mocha", "^3.0.0")]));
        assert_eq!(
            groups.client,
            map(&[("gulp-sass", "^2.0.0"), ("lodash", "^4.0.0")])
        );
        assert_eq!(groups.build_tool, map(&[("gulp", "^3.9.0")]));
        assert!(groups.server.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_groups() {
        let groups = classify(&DependencyMap::new());
        assert_eq!(groups, DependencyGroups::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_every_entry_lands_in_exactly_one_group() {
        let aux = map(&[
            ("chai", "^3.5.0"),
            ("gulp-mocha", "^3.0.0"),
            ("gulp-eslint", "^3.0.0"),
            ("gulp-uglify", "^2.0.0"),
            ("gulp-sourcemaps", "^1.6.0"),
            ("gulp-livereload", "^3.8.0"),
            ("grunt", "^1.0.0"),
            ("run-sequence", "^1.2.0"),
            ("karma-jasmine", "^1.0.0"),
            ("rxjs", "^5.0.0"),
            ("zone.js", "^0.7.0"),
        ]);

        let groups = classify(&aux);
        assert_eq!(groups.len(), aux.len());

        for name in aux.keys() {
            let hits = [
                &groups.server,
                &groups.client,
                &groups.build_tool,
                &groups.test,
            ]
            .iter()
            .filter(|g| g.contains_key(name))
            .count();
            assert_eq!(hits, 1, "{} classified {} times", name, hits);
        }
    }

    #[test]
    fn test_rule_order_decides_overlaps() {
        // test keywords are checked before build-tool keywords
        assert_eq!(
            Classifier::default().categorize("gulp-mocha"),
            DependencyCategory::Test
        );
        // client-tool keywords are checked before build-tool keywords
        assert_eq!(
            Classifier::default().categorize("gulp-sass"),
            DependencyCategory::Client
        );
        assert_eq!(
            Classifier::default().categorize("gulp-concat"),
            DependencyCategory::BuildTool
        );
    }

    #[test]
    fn test_incidental_substring_is_not_corrected() {
        assert_eq!(
            Classifier::default().categorize("my-sass-helper"),
            DependencyCategory::Client
        );
        assert_eq!(
            Classifier::default().categorize("shouldy-config"),
            DependencyCategory::Test
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            Classifier::default().categorize("Mocha-Reporter"),
            DependencyCategory::Client
        );
        assert_eq!(
            Classifier::default().categorize("GULP"),
            DependencyCategory::Client
        );
    }

    #[test]
    fn test_classification_ignores_input_order() {
        let forward = vec![
            ("mocha", "^3.0.0"),
            ("gulp", "^3.9.0"),
            ("lodash", "^4.0.0"),
            ("gulp-sass", "^2.0.0"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(classify(&map(&forward)), classify(&map(&reversed)));
    }

    #[test]
    fn test_custom_rules_and_fallback() {
        let classifier = Classifier::new(
            vec![ClassificationRule::new(
                &["express"],
                DependencyCategory::Server,
            )],
            DependencyCategory::Test,
        );
        let groups = classifier.classify(&map(&[("express-session", "1"), ("other", "2")]));

        assert_eq!(groups.server, map(&[("express-session", "1")]));
        assert_eq!(groups.test, map(&[("other", "2")]));
    }

    #[test]
    fn test_classifier_parses_from_yaml() {
        let yaml = r#"
rules:
  - keywords: ["jest"]
    category: test
  - keywords: ["webpack"]
    category: buildTool
"#;
        let classifier: Classifier = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(classifier.fallback, DependencyCategory::Client);
        assert_eq!(classifier.categorize("jest-cli"), DependencyCategory::Test);
        assert_eq!(
            classifier.categorize("webpack-dev-server"),
            DependencyCategory::BuildTool
        );
    }
}
