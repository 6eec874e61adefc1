//! MEAN2 Starter CLI - project scaffolding for MEAN2 applications

mod logging;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use colored::Colorize;
use starter_core::tui::CreateArgs;
use starter_core::{Answers, GeneratorConfig, TemplateManifest};
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MEAN2 starter configuration
#[derive(Clone)]
pub struct Mean2Config;

impl GeneratorConfig for Mean2Config {
    fn name(&self) -> &'static str {
        "mean2-starter"
    }

    fn display_name(&self) -> &'static str {
        "MEAN2 Starter"
    }

    fn bundled_template_dir(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/mean2")
    }

    fn template_dir_env(&self) -> &'static str {
        "MEAN2_TEMPLATE_DIR"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install mean2-starter --force"
    }

    fn next_steps(&self, dir: &Path, answers: &Answers) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        if answers.docker {
            if answers.multiservice {
                steps.push("docker-compose up --build".to_string());
            } else {
                steps.push(format!("docker build -t {} .", answers.app_name));
            }
        } else {
            steps.push("npm install".to_string());
            steps.push("npm start".to_string());
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "mean2-starter")]
#[command(about = "CLI for scaffolding MEAN2 starter applications")]
#[command(version)]
pub struct Args {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new MEAN2 project
    Create(CliCreateArgs),
    /// Show how the template's dependencies would be classified and assembled
    Deps(DepsArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Application name (lowercase, no spaces)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Application description
    #[arg(long)]
    pub description: Option<String>,

    /// Include the client-side Angular2 framework
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub client: Option<bool>,

    /// Develop and/or deploy with Docker
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub docker: Option<bool>,

    /// Include a framework for multiple Docker services (requires --docker)
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub multiservice: Option<bool>,

    /// File holding remembered answers (defaults to ~/.mean2-starter.yaml)
    #[arg(long = "defaults-file")]
    pub defaults_file: Option<PathBuf>,

    /// Don't read or write remembered answers
    #[arg(long = "no-store")]
    pub no_store: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            name: args.name,
            description: args.description,
            client: args.client,
            docker: args.docker,
            multiservice: args.multiservice,
            defaults_file: args.defaults_file,
            no_store: args.no_store,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct DepsArgs {
    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Assemble for a Docker build
    #[arg(long)]
    pub docker: bool,

    /// Assemble without the client-side framework
    #[arg(long = "no-client")]
    pub no_client: bool,

    /// Print only the resulting package.json
    #[arg(long)]
    pub json: bool,
}

async fn show_deps(config: &Mean2Config, args: DepsArgs) -> Result<()> {
    let template_dir = config.resolve_template_dir(args.template_dir.as_deref());
    let manifest = TemplateManifest::load(&template_dir).await?;
    let answers = Answers::new(config.name(), "", !args.no_client, args.docker, false);

    let (assembled, json) = starter_core::generator::preview(&template_dir, &manifest, &answers).await?;

    if args.json {
        print!("{}", json);
        return Ok(());
    }

    println!(
        "{}",
        format!("{} ({})", manifest.name, template_dir.display())
            .cyan()
            .bold()
    );
    println!();
    starter_core::generator::print_assembly(&assembled);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    logging::init_cli_logger(args.verbose);
    tracing::debug!(version = CLI_VERSION, "starting");
    let config = Mean2Config;

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = starter_core::run(&config, create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Deps(deps_args)) => show_deps(&config, deps_args).await,
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = starter_core::run(&config, CreateArgs::default(), CLI_VERSION).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
