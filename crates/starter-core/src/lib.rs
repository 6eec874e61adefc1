//! Starter Core - shared library for the MEAN2 starter generator
//!
//! Given a handful of answers (app name, description, client framework,
//! Docker, multiple services) this library copies and renders a template
//! directory into a destination and writes a `package.json` whose
//! dependencies have been reclassified for the chosen setup.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - dependency classification and assembly,
//!   template patterns, rendering, copying
//! - **Layer 2: Workflow** - `GeneratorConfig` trait and [`generate`] for custom front-ends
//! - **Layer 3: CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use starter_core::{generate, Answers, TemplateManifest};
//!
//! let manifest = TemplateManifest::load(&template_dir).await?;
//! let answers = Answers::new("myapp", "My app", true, false, false);
//! let report = generate(&template_dir, &manifest, &answers, &destination).await?;
//! ```

pub mod answers;
pub mod config;
pub mod deps;
pub mod error;
pub mod generator;
pub mod product;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{normalize_app_name, validate_app_name, Answers};
pub use config::StoredDefaults;
pub use deps::{assemble, classify, Classifier, DependencyGroups, FeatureFlags, FinalManifest};
pub use error::{ManifestError, RenderError};
pub use generator::{generate, GenerationReport};
pub use product::GeneratorConfig;
pub use templates::TemplateManifest;

#[cfg(feature = "tui")]
pub use tui::run;
