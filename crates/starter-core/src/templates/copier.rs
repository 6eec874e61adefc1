//! Template file copying driven by the manifest's steps

use crate::answers::Answers;
use crate::templates::manifest::{CopyStep, RemoveStep};
use crate::templates::pattern::Pattern;
use crate::templates::render::render;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Relative paths (with `/` separators) of every file under `dir` selected by `pattern`
pub fn select_files(dir: &Path, pattern: &Pattern) -> Result<Vec<String>> {
    let mut selected = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("{} is outside {}", entry.path().display(), dir.display()))?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if pattern.selects(&relative) {
            selected.push(relative);
        }
    }

    Ok(selected)
}

/// Run one copy step. Returns the destination paths written.
pub async fn copy_step(
    template_dir: &Path,
    step: &CopyStep,
    destination_root: &Path,
    answers: &Answers,
    context: &BTreeMap<String, String>,
) -> Result<Vec<PathBuf>> {
    let source_dir = template_dir.join(&step.source);
    if !source_dir.is_dir() {
        anyhow::bail!("Template source directory not found: {}", source_dir.display());
    }

    let target_dir = step.target.resolve(destination_root, answers);
    let pattern = Pattern::new(&step.pattern)?;
    let files = select_files(&source_dir, &pattern)?;
    tracing::debug!(
        source = %step.source,
        pattern = pattern.as_str(),
        count = files.len(),
        "copy step"
    );

    let mut written = Vec::new();
    for relative in files {
        let source_path = source_dir.join(&relative);
        let target_path = target_dir.join(&relative);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let bytes = fs::read(&source_path)
            .await
            .with_context(|| format!("Failed to read {}", source_path.display()))?;

        // binary files are copied verbatim even when rendering is requested
        let content = match (step.render, String::from_utf8(bytes)) {
            (true, Ok(text)) => render(&text, context)
                .with_context(|| format!("Failed to render {}", source_path.display()))?
                .into_bytes(),
            (_, Ok(text)) => text.into_bytes(),
            (_, Err(e)) => e.into_bytes(),
        };

        fs::write(&target_path, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        tracing::debug!(file = %target_path.display(), "wrote");

        written.push(target_path);
    }

    Ok(written)
}

/// Run one removal step. Returns the removed path, if there was anything to remove.
pub async fn remove_step(
    step: &RemoveStep,
    destination_root: &Path,
    answers: &Answers,
) -> Result<Option<PathBuf>> {
    let path = step.target.resolve(destination_root, answers).join(&step.path);
    match fs::remove_file(&path).await {
        Ok(()) => {
            tracing::debug!(file = %path.display(), "removed");
            Ok(Some(path))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}
