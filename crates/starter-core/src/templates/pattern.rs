//! Glob patterns for selecting template files
//!
//! Patterns are `/`-separated globs compiled with `globset`. `*` and `?` stay
//! within one path segment, `**` spans any number of segments, and braces and
//! character classes work as usual. Dot-files are not special.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    matcher: GlobMatcher,
}

impl Pattern {
    pub fn new(raw: &str) -> Result<Self> {
        let glob = GlobBuilder::new(raw)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid file pattern: {}", raw))?;
        Ok(Self {
            raw: raw.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Does the pattern match this exact relative path?
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Should a file at this relative path be selected?
    ///
    /// True when the pattern matches the file itself or any directory above it.
    pub fn selects(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        (1..=parts.len()).any(|n| self.matcher.is_match(parts[..n].join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> Pattern {
        Pattern::new(raw).unwrap()
    }

    #[test]
    fn test_top_level_with_extension() {
        let p = pattern("*.*");
        assert!(p.matches("package.json"));
        assert!(p.matches(".gitignore"));
        assert!(!p.matches("LICENSE"));
        assert!(!p.matches("src/server.js"));
    }

    #[test]
    fn test_single_directory_level() {
        let p = pattern("src/*.js");
        assert!(p.matches("src/server.js"));
        assert!(!p.matches("src/server.ts"));
        assert!(!p.matches("src/server/app.js"));
    }

    #[test]
    fn test_any_depth() {
        let p = pattern("src/server/**/*.*");
        assert!(p.matches("src/server/app.js"));
        assert!(p.matches("src/server/app/core/routes/core.routes.js"));
        assert!(!p.matches("src/client/main.ts"));

        let all = pattern("**");
        assert!(all.matches("docker-compose.yml"));
        assert!(all.matches("services/api/Dockerfile"));
    }

    #[test]
    fn test_trailing_any_depth() {
        let p = pattern("config/**");
        assert!(p.matches("config/env/default.js"));
        assert!(p.matches("config/assets.js"));
        assert!(!p.matches("src/config/x.js"));
    }

    #[test]
    fn test_question_mark() {
        let p = pattern("file?.txt");
        assert!(p.matches("file1.txt"));
        assert!(!p.matches("file10.txt"));
    }

    #[test]
    fn test_star_backtracking() {
        let p = pattern("*.spec.js");
        assert!(p.matches("user.controller.spec.js"));
        assert!(!p.matches("user.controller.js"));
    }

    #[test]
    fn test_braces_and_classes() {
        let p = pattern("*.{js,ts}");
        assert!(p.matches("a.js"));
        assert!(p.matches("main.ts"));
        assert!(!p.matches("style.css"));

        let p = pattern("[ab].js");
        assert!(p.matches("a.js"));
        assert!(p.matches("b.js"));
        assert!(!p.matches("c.js"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = Pattern::new("[ab").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid file pattern: [ab"));
    }

    #[test]
    fn test_directory_match_selects_contents() {
        let p = pattern("*");
        assert!(p.selects("Dockerfile"));
        assert!(p.selects("config/env/docker.js"));

        let p = pattern("*.*");
        assert!(!p.selects("config/env/default.js"));

        let p = pattern("src/{server,client}");
        assert!(p.selects("src/server/app.js"));
        assert!(!p.selects("src/shared/util.js"));
    }
}
