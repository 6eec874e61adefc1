//! Template selection, rendering, and copying
//!
//! This module provides:
//! - The template manifest (`template.yaml`) with its conditional copy and remove steps
//! - Glob patterns for picking files out of a template directory
//! - Variable substitution for rendered files
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod pattern;
pub mod render;
pub mod version;

pub use copier::{copy_step, remove_step, select_files};
pub use manifest::{Condition, CopyStep, RemoveStep, Target, TemplateManifest, MANIFEST_FILE};
pub use pattern::Pattern;
pub use render::render;
pub use version::check_compatibility;
