//! Data-science project layout.
//!
//! Adds the data, notebooks, models, references and reports folders, a conda
//! environment file and a small management package on top of the base
//! layout. The plain requirements file is dropped in favour of
//! `environment.yaml`, and the readme is replaced with one describing the
//! folder organisation.

use std::sync::Arc;

use tracing::debug;

use super::{Extension, ExtensionRef, markdown, no_skeleton::NoSkeleton, pre_commit::PreCommit};
use crate::base::DEFINE_STRUCTURE;
use crate::domain::{
    Action, DomainResult, MergeMode, Options, PipelineBuilder, Placement, ProjectTree, keys,
};
use crate::templates::beeproject as tpl;

pub const ADD_BEEPROJECT: &str = "add_beeproject";
pub const REPLACE_README: &str = "replace_readme";

const DATA_SUBFOLDERS: [&str; 4] = ["external", "interim", "preprocessed", "raw"];

#[derive(Debug, Clone, Copy, Default)]
pub struct BeeProject;

impl Extension for BeeProject {
    fn name(&self) -> &'static str {
        "beeproject"
    }

    fn description(&self) -> &'static str {
        "Template for data-science projects"
    }

    fn activate(&self, builder: PipelineBuilder) -> PipelineBuilder {
        builder
            .register(
                Action::new(ADD_BEEPROJECT, add_beeproject),
                Placement::After(DEFINE_STRUCTURE),
            )
            .register(
                Action::new(REPLACE_README, replace_readme),
                Placement::After(ADD_BEEPROJECT),
            )
    }

    /// The skeleton module makes no sense next to the management package,
    /// and the layout ships with pre-commit hooks.
    fn on_flag(&self) -> Vec<ExtensionRef> {
        vec![Arc::new(NoSkeleton), Arc::new(PreCommit), Arc::new(*self)]
    }
}

/// Insert the data-science folders and the management package.
///
/// Every file is added without overwriting, so running this twice or on top
/// of existing content is safe. The only removal is `requirements.txt`.
pub fn add_beeproject(
    mut tree: ProjectTree,
    options: Options,
) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?;
    let package = options.require(keys::PACKAGE)?;

    let mut ensure = |rel: &[&str], content: String| {
        let mut path = Vec::with_capacity(rel.len() + 1);
        path.push(project);
        path.extend_from_slice(rel);
        tree.ensure(&path, content, MergeMode::NoOverwrite)
    };

    let gitignore_all = tpl::GITIGNORE_ALL.render(&options)?;
    ensure(&["data", ".gitignore"], tpl::GITIGNORE_DATA.render(&options)?)?;
    for folder in DATA_SUBFOLDERS {
        ensure(&["data", folder, ".gitignore"], gitignore_all.clone())?;
    }

    ensure(&["notebooks", "template.ipynb"], tpl::NOTEBOOK.render(&options)?)?;
    ensure(&["models", ".gitignore"], gitignore_all.clone())?;

    // Empty markers so that git keeps the folders.
    ensure(&["references", ".gitignore"], String::new())?;
    ensure(&["reports", "figures", ".gitignore"], String::new())?;

    ensure(&["environment.yaml"], tpl::ENVIRONMENT_YAML.render(&options)?)?;

    let settings = tpl::SETTINGS.render(&options)?;
    let compat = tpl::COMPAT.render(&options)?;
    let pkg = ["src", package];
    let in_pkg = |file: &'static str| [pkg[0], pkg[1], file];
    let in_sub = |file: &'static str| [pkg[0], pkg[1], "submodule", file];

    ensure(&in_pkg("run_project_main.py"), tpl::RUN_PROJECT_MAIN.render(&options)?)?;
    ensure(&in_pkg("project_config.yaml"), tpl::PROJECT_CONFIG.render(&options)?)?;
    ensure(&in_pkg("settings.py"), settings.clone())?;
    ensure(&in_pkg("manage.py"), tpl::MANAGE.render(&options)?)?;
    ensure(&in_pkg("_compat.py"), compat.clone())?;
    ensure(&in_pkg("postgresql_operations.py"), tpl::POSTGRESQL.render(&options)?)?;

    ensure(&in_sub("__init__.py"), tpl::SUBMODULE_INIT.render(&options)?)?;
    ensure(&in_sub("settings.py"), settings)?;
    ensure(&in_sub("manage.py"), tpl::SUBMODULE_MANAGE.render(&options)?)?;
    ensure(&in_sub("_compat.py"), compat)?;

    let requirements = tree.reject(&[project, "requirements.txt"]);
    debug!(
        project,
        package,
        dropped_requirements = requirements.is_some(),
        "data-science layout added"
    );

    Ok((tree, options))
}

/// Let the markdown conversion run, then put our own readme in its place.
pub fn replace_readme(tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
    let (mut tree, options) = markdown::build(tree, options)?;

    let project = options.require(keys::PROJECT)?;
    let readme = [project, "README.md"];
    tree.reject(&readme);
    tree.ensure(&readme, tpl::README_MD.render(&options)?, MergeMode::NoOverwrite)?;
    debug!(project, "readme replaced");

    Ok((tree, options))
}
