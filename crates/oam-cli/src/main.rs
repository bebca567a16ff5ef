//! oam CLI - scaffolding for frontend projects and components

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use oam_core::tui::{CreateArgs, GenerateArgs};
use oam_core::{PackageManager, ProductConfig, Settings};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// oam product configuration
#[derive(Clone)]
pub struct OamConfig;

impl ProductConfig for OamConfig {
    fn name(&self) -> &'static str {
        "oam"
    }

    fn display_name(&self) -> &'static str {
        "oam"
    }

    fn cli_description(&self) -> &'static str {
        "Scaffold frontend projects, components and hooks"
    }

    fn install_root_env(&self) -> &'static str {
        "OAM_HOME"
    }

    fn default_install_root(&self) -> PathBuf {
        oam_core::config::default_install_root()
    }

    fn template_repo_env(&self) -> &'static str {
        "OAM_TEMPLATE_REPO"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install oam-cli --force"
    }

    fn next_steps(&self, project_dir: &Path, package_manager: PackageManager) -> Vec<String> {
        let mut steps = Vec::new();

        let current = std::env::current_dir().ok();
        let shown = current
            .as_deref()
            .and_then(|cwd| project_dir.strip_prefix(cwd).ok())
            .unwrap_or(project_dir);
        steps.push(format!("cd {}", shown.display()));

        steps.push(package_manager.install_command().to_string());
        steps.push(package_manager.dev_command().to_string());
        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "oam")]
#[command(about = "Scaffold frontend projects, components and hooks")]
#[command(version)]
pub struct Args {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    Create(CliCreateArgs),

    /// Generate a component in the current directory
    #[command(alias = "c")]
    Component {
        /// Component name (e.g. UserCard or user-card)
        name: String,

        /// Accept the default answer for every question
        #[arg(short, long)]
        yes: bool,
    },

    /// Run a generator (component, hook, template)
    #[command(alias = "g")]
    Generate(CliGenerateArgs),

    /// List the bundled project templates
    List,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name; also the directory that is created
    pub project_name: Option<String>,

    /// Bundled template to use (react, vue, vanilla)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Git repository to use as the template instead of the bundled ones
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch of the template repository
    #[arg(long)]
    pub branch: Option<String>,

    /// Project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Project author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Use yarn instead of npm
    #[arg(long)]
    pub yarn: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            project_name: args.project_name,
            template: args.template,
            repo: args.repo,
            branch: args.branch,
            description: args.description,
            author: args.author,
            yarn: args.yarn,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliGenerateArgs {
    /// Generator to run; prompts when omitted
    pub generator: Option<String>,

    /// Generator definition file to use instead of the bundled one
    #[arg(long)]
    pub generators: Option<PathBuf>,

    /// Accept the default answer for every question
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliGenerateArgs> for GenerateArgs {
    fn from(args: CliGenerateArgs) -> Self {
        GenerateArgs {
            generators: args.generators,
            generator: args.generator,
            yes: args.yes,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, config: &OamConfig) -> anyhow::Result<()> {
    let settings = Settings::from_config(config);
    tracing::debug!(install_root = %settings.install_root.display(), "resolved settings");

    match command {
        Command::Create(create_args) => {
            oam_core::tui::run_create(config, settings, create_args.into(), CLI_VERSION).await
        }
        Command::Component { name, yes } => {
            oam_core::tui::run_component(&settings, name, yes).await
        }
        Command::Generate(generate_args) => {
            oam_core::tui::run_generate(&settings, generate_args.into()).await
        }
        Command::List => oam_core::tui::list(&settings).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
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

    // Help and --version exit 0; any other argument error exits 1
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    };

    let result = run(command, &OamConfig).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_aliases_parse() {
        let args = Args::try_parse_from(["oam", "c", "UserCard"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Component { name, yes: false }) if name == "UserCard"
        ));

        let args = Args::try_parse_from(["oam", "g", "hook"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Generate(CliGenerateArgs { generator: Some(ref g), .. })) if g == "hook"
        ));
    }

    #[test]
    fn test_create_flags() {
        let args = Args::try_parse_from([
            "oam", "create", "my-app", "--template", "vue", "--yarn", "-y", "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create");
        };
        assert_eq!(create.project_name.as_deref(), Some("my-app"));
        assert_eq!(create.template.as_deref(), Some("vue"));
        assert!(create.yarn && create.yes);
    }

    #[test]
    fn test_yes_reaches_component_and_generate() {
        let args = Args::try_parse_from(["oam", "c", "UserCard", "-y"]).unwrap();
        assert!(matches!(args.command, Some(Command::Component { yes: true, .. })));

        let args = Args::try_parse_from(["oam", "generate", "hook", "--yes"]).unwrap();
        let Some(Command::Generate(generate)) = args.command else {
            panic!("expected generate");
        };
        let generate: GenerateArgs = generate.into();
        assert!(generate.yes);
        assert_eq!(generate.generator.as_deref(), Some("hook"));
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let err = Args::try_parse_from(["oam", "frobnicate"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_next_steps() {
        let dir = std::env::current_dir().unwrap().join("my-app");
        let steps = OamConfig.next_steps(&dir, PackageManager::Yarn);
        assert_eq!(steps, vec!["cd my-app", "yarn", "yarn dev"]);
    }
}
