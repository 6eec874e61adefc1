//! Charm-style CLI prompts using cliclack

use crate::answers::{default_app_name, validate_app_name, Answers};
use crate::config::{default_defaults_path, StoredDefaults};
use crate::generator::{generate, GenerationReport};
use crate::product::GeneratorConfig;
use crate::templates::{version, TemplateManifest};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local template directory instead of the bundled one
    pub template_dir: Option<PathBuf>,

    /// Destination root
    pub directory: Option<PathBuf>,

    /// Application name
    pub name: Option<String>,

    /// Application description
    pub description: Option<String>,

    /// Include the client-side framework
    pub client: Option<bool>,

    /// Develop/deploy with Docker
    pub docker: Option<bool>,

    /// Include the multi-service Docker layout
    pub multiservice: Option<bool>,

    /// Stored defaults file instead of the one in the home directory
    pub defaults_file: Option<PathBuf>,

    /// Neither read nor write stored defaults
    pub no_store: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the generator with interactive prompts
pub async fn run<C: GeneratorConfig>(
    config: &C,
    args: CreateArgs,
    cli_version: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Load the template manifest
    let template_dir = config.resolve_template_dir(args.template_dir.as_deref());
    let manifest = load_manifest(&template_dir).await?;

    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 2: Read stored defaults
    let defaults_path = if args.no_store {
        None
    } else {
        args.defaults_file
            .clone()
            .or_else(|| default_defaults_path(&config.defaults_file_name()))
    };
    let mut defaults = match &defaults_path {
        Some(path) => StoredDefaults::load(path).await?,
        None => StoredDefaults::default(),
    };

    // Step 3: Select directory
    let project_dir = select_directory(&args)?;

    // Step 4: Collect answers
    let answers = collect_answers(&args, &defaults, &project_dir)?;
    confirm_destination(&answers.app_destination(&project_dir), &args).await?;

    // Step 5: Create project
    let report = create_project(&template_dir, &manifest, &answers, &project_dir).await?;

    // Step 6: Remember answers for next time
    if let Some(path) = &defaults_path {
        defaults.remember(&answers);
        if let Err(e) = defaults.save(path).await {
            cliclack::log::warning(format!("Could not store defaults: {:#}", e))?;
        }
    }

    // Step 7: Show next steps
    print_next_steps(config, &report.app_dir, &answers)?;

    Ok(())
}

async fn load_manifest(template_dir: &Path) -> Result<TemplateManifest> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    match TemplateManifest::load(template_dir).await {
        Ok(manifest) => {
            spinner.stop(format!(
                "Template: {} - {}",
                manifest.name, manifest.description
            ));
            Ok(manifest)
        }
        Err(e) => {
            spinner.stop("Failed to load templates");
            Err(e)
        }
    }
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    Ok(path)
}

/// Ask for every answer not supplied on the command line
fn collect_answers(
    args: &CreateArgs,
    defaults: &StoredDefaults,
    project_dir: &Path,
) -> Result<Answers> {
    let default_name = defaults
        .app_name
        .clone()
        .unwrap_or_else(|| default_app_name(project_dir));

    let raw_name = match &args.name {
        Some(name) => name.clone(),
        None if args.yes => default_name,
        None => cliclack::input(
            "Provide a name for this application or service. It should be lowercase and should not contain spaces.",
        )
        .default_input(&default_name)
        .validate(|input: &String| {
            validate_app_name(input)
                .map(|_| ())
                .map_err(|_| "Please enter a name without slashes, `.` or `..`")
        })
        .interact()?,
    };
    let app_name = validate_app_name(&raw_name)?;

    let default_description = defaults.description.clone().unwrap_or_default();
    let description = match &args.description {
        Some(description) => description.clone(),
        None if args.yes => default_description,
        None => cliclack::input("Provide a description for the application")
            .default_input(&default_description)
            .required(false)
            .interact()?,
    };

    let client = ask_confirm(
        args.client,
        defaults.client.unwrap_or(true),
        args.yes,
        "Would you like to install the client-side Angular2 framework in addition to the server components?",
    )?;

    let docker = ask_confirm(
        args.docker,
        defaults.docker.unwrap_or(false),
        args.yes,
        "Will you be using Docker to develop and/or deploy this application?",
    )?;

    let multiservice = if docker {
        ask_confirm(
            args.multiservice,
            false,
            args.yes,
            "Would you like to include a framework for multiple docker services?",
        )?
    } else {
        if args.multiservice == Some(true) {
            cliclack::log::warning("Multiple services require Docker; ignoring --multiservice")?;
        }
        false
    };

    let answers = Answers::new(&app_name, &description, client, docker, multiservice);
    if answers.app_name != raw_name {
        cliclack::log::info(format!("Application name: {}", answers.app_name))?;
    }
    Ok(answers)
}

fn ask_confirm(given: Option<bool>, default: bool, yes: bool, prompt: &str) -> Result<bool> {
    match given {
        Some(value) => Ok(value),
        None if yes => Ok(default),
        None => Ok(cliclack::confirm(prompt).initial_value(default).interact()?),
    }
}

async fn confirm_destination(app_dir: &Path, args: &CreateArgs) -> Result<()> {
    let Ok(mut entries) = tokio::fs::read_dir(app_dir).await else {
        return Ok(());
    };

    let mut count = 0;
    while let Ok(Some(_)) = entries.next_entry().await {
        count += 1;
    }
    if count == 0 {
        return Ok(());
    }

    cliclack::log::warning(format!("Directory has {} existing items", count))?;

    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Continue anyway?")
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }

    Ok(())
}

async fn create_project(
    template_dir: &Path,
    manifest: &TemplateManifest,
    answers: &Answers,
    project_dir: &Path,
) -> Result<GenerationReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match generate(template_dir, manifest, answers, project_dir).await {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len(),
                report.app_dir.display()
            ));
            let deps = &report.package.manifest;
            cliclack::log::success(format!(
                "package.json: {} dependencies, {} devDependencies",
                deps.dependencies.len(),
                deps.dev_dependencies.len()
            ))?;
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            Err(e)
        }
    }
}

fn print_next_steps<C: GeneratorConfig>(config: &C, app_dir: &Path, answers: &Answers) -> Result<()> {
    let steps = config.next_steps(app_dir, answers);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
