//! Generation workflow: copy, remove, then write the assembled package.json

use crate::answers::{validate_app_name, Answers};
use crate::deps::{AssembledPackage, DependencyCategory, DependencyMap, PackageManifest};
use crate::templates::{copier, TemplateManifest};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// What a generation run produced
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Directory holding the application files
    pub app_dir: PathBuf,
    /// Every file written, in write order (package.json last)
    pub files: Vec<PathBuf>,
    /// Files deleted by removal steps
    pub removed: Vec<PathBuf>,
    pub package: AssembledPackage,
}

/// Generate a project into `destination_root`
pub async fn generate(
    template_dir: &Path,
    manifest: &TemplateManifest,
    answers: &Answers,
    destination_root: &Path,
) -> Result<GenerationReport> {
    validate_app_name(&answers.app_name)?;
    let context = answers.render_context();
    let app_dir = answers.app_destination(destination_root);
    tracing::info!(
        template = %manifest.name,
        destination = %app_dir.display(),
        "generating project"
    );

    let mut files = Vec::new();
    for step in manifest.steps.iter().filter(|s| s.applies(answers)) {
        let written =
            copier::copy_step(template_dir, step, destination_root, answers, &context).await?;
        // a later step overwriting a file moves it to the end
        for path in written {
            files.retain(|f| f != &path);
            files.push(path);
        }
    }

    let mut removed = Vec::new();
    for step in manifest.remove.iter().filter(|s| s.applies(answers)) {
        if let Some(path) = copier::remove_step(step, destination_root, answers).await? {
            files.retain(|f| f != &path);
            removed.push(path);
        }
    }

    let (mut package, source) = load_package(template_dir, manifest).await?;
    tracing::debug!(source = %source.display(), "assembling package manifest");
    let assembled =
        package.assemble_for(answers, &manifest.classifier(), &manifest.docker_dependencies)?;

    let package_path = package.write_to(&app_dir).await?;
    files.retain(|f| f != &package_path);
    files.push(package_path);

    tracing::info!(files = files.len(), removed = removed.len(), "project generated");

    Ok(GenerationReport {
        app_dir,
        files,
        removed,
        package: assembled,
    })
}

async fn load_package(
    template_dir: &Path,
    manifest: &TemplateManifest,
) -> Result<(PackageManifest, PathBuf)> {
    let source = template_dir.join(&manifest.package_manifest);
    let package = PackageManifest::load(&source).await?;
    Ok((package, source))
}

/// Assemble the package manifest for `answers` without writing anything
pub async fn preview(
    template_dir: &Path,
    manifest: &TemplateManifest,
    answers: &Answers,
) -> Result<(AssembledPackage, String)> {
    let (mut package, _) = load_package(template_dir, manifest).await?;
    let assembled =
        package.assemble_for(answers, &manifest.classifier(), &manifest.docker_dependencies)?;
    let json = package.to_pretty_json()?;
    Ok((assembled, json))
}

fn print_group(title: &str, deps: &DependencyMap) {
    println!("  {} ({})", title.cyan().bold(), deps.len());
    for (name, version) in deps {
        println!("    {} {}", name, version.dimmed());
    }
}

/// Print how the dependencies were classified and where they ended up
pub fn print_assembly(assembled: &AssembledPackage) {
    println!("{}", "Dependency groups".bold());
    for category in [
        DependencyCategory::Server,
        DependencyCategory::Client,
        DependencyCategory::BuildTool,
        DependencyCategory::Test,
    ] {
        print_group(category.display_name(), assembled.groups.group(category));
    }

    println!();
    println!(
        "{} container mode: {}, client: {}",
        "Flags".bold(),
        yes_no(assembled.flags.container_mode),
        yes_no(assembled.flags.client_enabled)
    );
    println!();
    print_group("dependencies", &assembled.manifest.dependencies);
    print_group("devDependencies", &assembled.manifest.dev_dependencies);
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".yellow()
    }
}
