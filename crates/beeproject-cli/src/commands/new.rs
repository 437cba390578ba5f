//! Implementation of the `beeproject new` command.
//!
//! Responsibility: translate CLI arguments and configuration into a
//! `ScaffoldRequest`, call the core scaffold service, and display results.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use beeproject_adapters::LocalFilesystem;
use beeproject_core::{
    application::{ScaffoldPlan, ScaffoldRequest, ScaffoldService, WriteMode},
    domain::{Options, keys},
    extensions::{ExtensionRef, builtin_extensions, find_extension, resolve_activations},
};

use crate::{
    cli::{NewArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `beeproject new` command.
///
/// 1. Split the argument into project name and parent directory
/// 2. Merge flags over configured defaults into the generator options
/// 3. Expand extension flags into the extensions to activate
/// 4. Confirm with the user unless `--yes` or `--quiet`
/// 5. Plan only for `--dry-run`, otherwise scaffold
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (project_name, output_root) = resolve_project_path(&args.name)?;
    let options = build_options(&project_name, &args, &config);
    let extensions = collect_extensions(&args.extensions.enabled, &config)?;
    let mode = write_mode(&args);

    debug!(
        extensions = ?extensions.iter().map(|e| e.name()).collect::<Vec<_>>(),
        ?mode,
        "request resolved"
    );

    let request = ScaffoldRequest::new(options, &output_root)
        .with_extensions(extensions)
        .with_mode(mode);
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let plan = service.plan(&request)?;
        return show_plan(&plan, &output_root, &output);
    }

    if !output.is_quiet() && !args.yes && output.format() != OutputFormat::Json {
        show_configuration(&request, &project_name, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    output.header(&format!("Creating '{project_name}'..."))?;
    info!(project = %project_name, root = %output_root.display(), "Scaffold started");

    let report = service.scaffold(&request)?;

    if output.format() == OutputFormat::Json {
        output.json(&report)?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{project_name}' ready at {}",
        report.project_root.display()
    ))?;
    output.info(&format!("{} files written", report.written.len()))?;
    if !report.skipped.is_empty() {
        output.warning(&format!(
            "{} existing files kept (use --force to overwrite)",
            report.skipped.len()
        ))?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.project_root.display()))?;
    if request.extensions.iter().any(|e| e.name() == "beeproject") {
        output.print("  conda env create -f environment.yaml")?;
    }
    output.print("  git init")?;

    Ok(())
}

// ── Request construction ──────────────────────────────────────────────────────

/// `foo` -> (`foo`, `.`), `../work/foo` -> (`foo`, `../work`)
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("cannot take a project name from '{name}'"),
            source: None,
        })?
        .to_owned();

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok((project_name, parent))
}

/// Flags win over configured defaults; anything unset is left to the
/// generator's own defaults.
fn build_options(project: &str, args: &NewArgs, config: &AppConfig) -> Options {
    let defaults = &config.defaults;
    let pairs = [
        (keys::PACKAGE, args.package.as_ref()),
        (keys::DESCRIPTION, args.description.as_ref()),
        (keys::AUTHOR, args.author.as_ref().or(defaults.author.as_ref())),
        (keys::EMAIL, args.email.as_ref().or(defaults.email.as_ref())),
        (keys::URL, args.url.as_ref().or(defaults.url.as_ref())),
        (keys::LICENSE, args.license.as_ref().or(defaults.license.as_ref())),
        (
            keys::PYTHON_VERSION,
            args.python_version
                .as_ref()
                .or(defaults.python_version.as_ref()),
        ),
    ];

    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.clone())))
        .fold(Options::new().with(keys::PROJECT, project), |opts, (k, v)| {
            opts.with(k, v)
        })
}

/// Configured extensions come first, then flags in command-line order.
fn collect_extensions(flags: &[ExtensionRef], config: &AppConfig) -> CliResult<Vec<ExtensionRef>> {
    let mut given = config
        .defaults
        .extensions
        .iter()
        .map(|name| {
            find_extension(name).ok_or_else(|| CliError::UnknownExtension {
                name: name.clone(),
                available: builtin_extensions()
                    .iter()
                    .map(|e| e.name().to_owned())
                    .collect(),
            })
        })
        .collect::<CliResult<Vec<_>>>()?;
    given.extend(flags.iter().cloned());

    Ok(resolve_activations(&given))
}

fn write_mode(args: &NewArgs) -> WriteMode {
    if args.force {
        WriteMode::Force
    } else if args.update {
        WriteMode::Update
    } else {
        WriteMode::Create
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PlanView<'a> {
    project_root: PathBuf,
    actions: &'a [&'static str],
    files: Vec<PathBuf>,
}

fn show_plan(plan: &ScaffoldPlan, output_root: &Path, out: &OutputManager) -> CliResult<()> {
    let project = plan.options.get(keys::PROJECT).unwrap_or_default();
    let files: Vec<PathBuf> = plan.tree.files().into_iter().map(|(p, _)| p).collect();

    if out.format() == OutputFormat::Json {
        out.json(&PlanView {
            project_root: output_root.join(project),
            actions: &plan.actions,
            files,
        })?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create '{project}' in {}",
        output_root.display()
    ))?;
    out.print(&format!("  Actions: {}", plan.actions.join(" -> ")))?;
    out.print("")?;
    for file in &files {
        out.path(file)?;
    }
    out.print("")?;
    out.info(&format!("{} files", files.len()))?;
    Ok(())
}

fn show_configuration(request: &ScaffoldRequest, name: &str, out: &OutputManager) -> CliResult<()> {
    let extensions: Vec<_> = request.extensions.iter().map(|e| e.name()).collect();
    out.header("Configuration")?;
    out.print(&format!("  Project:    {name}"))?;
    for (key, value) in request.options.iter().filter(|(k, _)| *k != keys::PROJECT) {
        out.print(&format!("  {key:<10}  {value}"))?;
    }
    out.print(&format!(
        "  Extensions: {}",
        if extensions.is_empty() {
            "none".to_owned()
        } else {
            extensions.join(", ")
        }
    ))?;
    out.print(&format!("  Location:   {}", request.output_root.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
