//! Interactive `create`, `component`, `generate` and `list` flows

use super::prompts::ask;
use crate::config::Settings;
use crate::generator::{Generator, GeneratorFile};
use crate::materialize::{validate_project_name, Materializer, ProjectAnswers, ProjectTemplate};
use crate::product::ProductConfig;
use crate::prompt::Answers;
use crate::runtime::{self, PackageManager};
use crate::templates::{version, RootManifest, TemplateEntry};
use crate::writer;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Name of the project (and of the directory created for it)
    pub project_name: Option<String>,

    /// Bundled template id
    pub template: Option<String>,

    /// Remote git repository to use instead of the bundled templates
    pub repo: Option<String>,

    /// Branch of the remote repository
    pub branch: Option<String>,

    pub description: Option<String>,

    pub author: Option<String>,

    /// Use yarn instead of npm in the next steps
    pub yarn: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Arguments for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Generator definition file to use instead of the bundled one
    pub generators: Option<PathBuf>,

    /// Generator to run, skipping the selection prompt
    pub generator: Option<String>,

    /// Take every question's default instead of prompting
    pub yes: bool,
}

/// Create a new project with interactive prompts
pub async fn run_create<C: ProductConfig>(
    config: &C,
    settings: Settings,
    args: CreateArgs,
    cli_version: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let settings = settings.with_repo_override(args.repo.clone(), args.branch.clone());
    let project_name = select_project_name(&args)?;

    let template = match settings.remote_template() {
        Some(template) => {
            cliclack::log::info(format!("Using template repository {}", template.label()))?;
            template
        }
        None => {
            let entry = select_template(&settings, args.template.as_deref(), args.yes).await?;
            if let Some(warning) = entry.version.as_deref().and_then(|v| {
                version::check_compatibility(cli_version, v, config.upgrade_command())
            }) {
                cliclack::log::warning(format!("Version warning: {}", warning.summary()))?;
            }
            ProjectTemplate::LocalBundled(entry.id)
        }
    };

    let answers = project_answers(config, &args, project_name)?;
    let package_manager = select_package_manager(&args)?;

    check_tools(&settings, package_manager)?;

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let project_dir = cwd.join(&answers.project_name);
    create_project(&settings, &template, &project_dir, &answers).await?;

    print_next_steps(config, &project_dir, package_manager)
}

fn select_project_name(args: &CreateArgs) -> Result<String> {
    let name = match &args.project_name {
        Some(name) => name.trim().to_string(),
        None if args.yes => anyhow::bail!("a project name is required with --yes"),
        None => {
            let input: String = cliclack::input("Project name")
                .placeholder("my-app")
                .validate(|value: &String| {
                    validate_project_name(value).map_err(|e| e.to_string())
                })
                .interact()?;
            input.trim().to_string()
        }
    };

    validate_project_name(&name)?;
    Ok(name)
}

async fn select_template(
    settings: &Settings,
    specified: Option<&str>,
    yes: bool,
) -> Result<TemplateEntry> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let manifest = match RootManifest::load(&settings.templates_dir()).await {
        Ok(manifest) => manifest,
        Err(e) => {
            spinner.stop("Failed to load templates");
            return Err(e.into());
        }
    };

    if let Some(id) = specified {
        let Some(entry) = manifest.find(id) else {
            spinner.stop("Failed to load templates");
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                id,
                manifest.ids().join(", ")
            );
        };
        spinner.stop(format!("Template: {} - {}", entry.name, entry.description));
        return Ok(entry.clone());
    }

    spinner.stop("Templates loaded");

    let mut templates = manifest.templates.into_iter();
    let first = templates.next().context("No templates found.")?;

    // A single template, or --yes, needs no prompt
    if yes || templates.len() == 0 {
        cliclack::log::info(format!(
            "Using template: {} - {}",
            first.name, first.description
        ))?;
        return Ok(first);
    }

    let templates: Vec<TemplateEntry> = std::iter::once(first).chain(templates).collect();
    let mut select = cliclack::select("Select a template");
    for (idx, entry) in templates.iter().enumerate() {
        select = select.item(idx, &entry.name, &entry.description);
    }
    let selected_idx: usize = select.interact()?;

    templates
        .into_iter()
        .nth(selected_idx)
        .context("selected template is out of range")
}

fn project_answers<C: ProductConfig>(
    config: &C,
    args: &CreateArgs,
    project_name: String,
) -> Result<ProjectAnswers> {
    let description = match &args.description {
        Some(description) => description.clone(),
        None if args.yes => config.default_description().to_string(),
        None => cliclack::input("Project description")
            .default_input(config.default_description())
            .interact()?,
    };

    let author = match &args.author {
        Some(author) => author.clone(),
        None if args.yes => String::new(),
        None => cliclack::input("Author")
            .placeholder("optional")
            .required(false)
            .interact()?,
    };

    Ok(ProjectAnswers::new(project_name, description).with_author(author))
}

fn select_package_manager(args: &CreateArgs) -> Result<PackageManager> {
    if args.yarn {
        return Ok(PackageManager::Yarn);
    }
    if args.yes {
        return Ok(PackageManager::Npm);
    }

    let use_npm: bool = cliclack::confirm("Use npm as the package manager?")
        .initial_value(true)
        .interact()?;
    Ok(if use_npm {
        PackageManager::Npm
    } else {
        PackageManager::Yarn
    })
}

fn check_tools(settings: &Settings, package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let tools = runtime::check_tools(settings.uses_remote(), package_manager);
    let summary: Vec<String> = tools.iter().map(|t| t.summary()).collect();
    spinner.stop(format!("Detected tools: {}", summary.join(", ")));

    for missing in tools.iter().filter(|t| !t.available) {
        cliclack::log::warning(format!(
            "{} was not found; some steps below may not work",
            missing.name
        ))?;
    }
    Ok(())
}

async fn create_project(
    settings: &Settings,
    template: &ProjectTemplate,
    project_dir: &Path,
    answers: &ProjectAnswers,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let materializer = Materializer::with_git(settings.templates_dir());
    match materializer.materialize(template, project_dir, answers).await {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    package_manager: PackageManager,
) -> Result<()> {
    let steps = config.next_steps(project_dir, package_manager);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

/// Generate a component in the current directory
pub async fn run_component(settings: &Settings, name: String, yes: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    settings.guard().check(&cwd)?;

    cliclack::intro("New component")?;

    let definitions = GeneratorFile::bundled()?;
    let generator = definitions
        .find("component")
        .context("the bundled generator definitions have no component generator")?;

    let answers = ask(&generator.questions, Answers::new().with("name", name), yes)?;
    write_output(generator, &answers, &cwd).await
}

/// Pick a generator from the definition file and run it
pub async fn run_generate(settings: &Settings, args: GenerateArgs) -> Result<()> {
    cliclack::intro("Generate")?;

    let definitions = match &args.generators {
        Some(path) => GeneratorFile::load(path).await?,
        None => GeneratorFile::bundled()?,
    };
    let generator = select_generator(&definitions, args.generator.as_deref())?;

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let guard = settings.guard();
    let root = if guard.is_install_root(&cwd) {
        // --yes cannot prompt for a target
        if args.yes {
            guard.check(&cwd)?;
        }
        let input: String = cliclack::input("Target directory")
            .placeholder("../my-app")
            .interact()?;
        let root = cwd.join(input.trim());
        guard.check(&root)?;
        root
    } else {
        cwd
    };

    let answers = ask(&generator.questions, Answers::new(), args.yes)?;
    write_output(generator, &answers, &root).await
}

fn select_generator<'a>(
    definitions: &'a GeneratorFile,
    specified: Option<&str>,
) -> Result<&'a Generator> {
    if let Some(name) = specified {
        return definitions.find(name).with_context(|| {
            let names: Vec<&str> = definitions.generators.iter().map(|g| g.name.as_str()).collect();
            format!(
                "Generator '{}' not found. Available generators: {}",
                name,
                names.join(", ")
            )
        });
    }

    match definitions.generators.as_slice() {
        [] => anyhow::bail!("No generators found."),
        [only] => Ok(only),
        all => {
            let mut select = cliclack::select("Select a generator");
            for (idx, generator) in all.iter().enumerate() {
                select = select.item(idx, &generator.name, &generator.description);
            }
            let selected_idx: usize = select.interact()?;
            all.get(selected_idx)
                .context("selected generator is out of range")
        }
    }
}

async fn write_output(generator: &Generator, answers: &Answers, root: &Path) -> Result<()> {
    let files = generator.plan(answers)?;
    let written = writer::write_files(root, &files).await?;

    for path in &written {
        let shown = path.strip_prefix(root).unwrap_or(path);
        cliclack::log::success(format!("Created {}", shown.display()))?;
    }
    cliclack::outro(format!("{} file(s) generated", written.len()))?;
    Ok(())
}

/// Print the bundled templates
pub async fn list(settings: &Settings) -> Result<()> {
    let manifest = RootManifest::load(&settings.templates_dir()).await?;

    println!("{}", "Available templates:".bold());
    for entry in &manifest.templates {
        println!(
            "  {:<10} {} {}",
            entry.id.cyan(),
            entry.name,
            format!("- {}", entry.description).dimmed()
        );
    }

    if let Some(repo) = &settings.template_repo {
        println!();
        println!(
            "{} {}",
            "Remote template repository in use:".yellow(),
            repo.url
        );
    }
    Ok(())
}
