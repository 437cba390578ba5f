//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

mod extension_flags;
pub mod global;

pub use extension_flags::ExtensionFlags;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "beeproject",
    bin_name = "beeproject",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f41d} Data-science project scaffolding",
    long_about = "beeproject generates a Python package layout and, with \
                  --beeproject, the folders, notebook, conda environment and \
                  management package of a data-science project.",
    after_help = "EXAMPLES:\n\
        \x20 beeproject new churn-model --beeproject\n\
        \x20 beeproject new my-lib --markdown --pre-commit\n\
        \x20 beeproject list\n\
        \x20 beeproject completions bash > /usr/share/bash-completion/completions/beeproject",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        after_help = "EXAMPLES:\n\
            \x20 beeproject new foo --beeproject\n\
            \x20 beeproject new ../foo --beeproject --author 'Ada Lovelace'\n\
            \x20 beeproject new foo --beeproject --update   # add files missing from ./foo"
    )]
    New(NewArgs),

    /// List available extensions.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Initialise a configuration file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 beeproject init           # user-wide config\n\
            \x20 beeproject init --local   # ./.beeproject.toml")]
    Init(InitArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 beeproject config get defaults.author\n\
            \x20 beeproject config list\n\
            \x20 beeproject config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path. A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Python package name (default: derived from the project name).
    #[arg(short = 'p', long, value_name = "NAME")]
    pub package: Option<String>,

    #[arg(long, value_name = "TEXT", help = "Author name")]
    pub author: Option<String>,

    #[arg(long, value_name = "EMAIL", help = "Author email")]
    pub email: Option<String>,

    #[arg(short = 'd', long, value_name = "TEXT", help = "One-line project description")]
    pub description: Option<String>,

    #[arg(long, value_name = "URL", help = "Project homepage")]
    pub url: Option<String>,

    #[arg(long, value_name = "ID", help = "License identifier (default: MIT)")]
    pub license: Option<String>,

    #[arg(long, value_name = "X.Y", help = "Python version for environment.yaml")]
    pub python_version: Option<String>,

    #[command(flatten)]
    pub extensions: ExtensionFlags,

    /// Add missing files to an existing project, keeping the rest.
    #[arg(long, conflicts_with = "force")]
    pub update: bool,

    /// Overwrite an existing project (destructive).
    #[arg(long)]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value = "table", help = "Output format")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Flag and help text, aligned.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.beeproject.toml` in the current directory instead.
    #[arg(long)]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long)]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the active configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_with_options() {
        let cli = parse(&["beeproject", "new", "foo", "--author", "Ada", "-y"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "foo");
        assert_eq!(args.author.as_deref(), Some("Ada"));
        assert!(args.yes);
        assert!(args.extensions.enabled.is_empty());
    }

    #[test]
    fn extension_flags_keep_command_line_order() {
        let cli = parse(&["beeproject", "new", "foo", "--pre-commit", "--beeproject"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        let names: Vec<_> = args.extensions.enabled.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["pre_commit", "beeproject"]);
    }

    #[test]
    fn update_and_force_conflict() {
        let result = Cli::try_parse_from(["beeproject", "new", "foo", "--update", "--force"]);
        assert!(result.is_err());
    }

    #[test]
    fn extension_flags_take_no_value() {
        let result = Cli::try_parse_from(["beeproject", "new", "foo", "--beeproject=yes"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["beeproject", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
