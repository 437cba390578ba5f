use std::sync::Arc;

use tracing::debug;

use super::{Extension, ExtensionRef};
use crate::base::DEFINE_STRUCTURE;
use crate::domain::{
    Action, DomainResult, MergeMode, Options, PipelineBuilder, Placement, ProjectTree, keys,
};
use crate::templates::pre_commit as tpl;

pub const ADD_PRE_COMMIT: &str = "add_pre_commit";

/// Adds a pre-commit configuration with isort, flake8 and friends.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreCommit;

impl Extension for PreCommit {
    fn name(&self) -> &'static str {
        "pre_commit"
    }

    fn description(&self) -> &'static str {
        "Generate pre-commit configuration file"
    }

    fn activate(&self, builder: PipelineBuilder) -> PipelineBuilder {
        builder.register(
            Action::new(ADD_PRE_COMMIT, add_pre_commit),
            Placement::After(DEFINE_STRUCTURE),
        )
    }

    fn on_flag(&self) -> Vec<ExtensionRef> {
        vec![Arc::new(*self)]
    }
}

pub fn add_pre_commit(
    mut tree: ProjectTree,
    options: Options,
) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?;

    tree.ensure(
        &[project, ".pre-commit-config.yaml"],
        tpl::PRE_COMMIT_CONFIG.render(&options)?,
        MergeMode::NoOverwrite,
    )?;
    tree.ensure(
        &[project, ".isort.cfg"],
        tpl::ISORT_CFG.render(&options)?,
        MergeMode::NoOverwrite,
    )?;
    debug!(project, "pre-commit configuration added");

    Ok((tree, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::new()
            .with(keys::PROJECT, "foo")
            .with(keys::PACKAGE, "foo")
    }

    #[test]
    fn adds_both_config_files() {
        let (tree, _) = add_pre_commit(ProjectTree::new(), opts()).unwrap();
        assert!(tree.contains(&["foo", ".pre-commit-config.yaml"]));
        assert!(
            tree.file(&["foo", ".isort.cfg"])
                .is_some_and(|c| c.contains("foo"))
        );
    }

    #[test]
    fn keeps_existing_config() {
        let mut tree = ProjectTree::new();
        tree.ensure(&["foo", ".isort.cfg"], "mine", MergeMode::NoOverwrite)
            .unwrap();
        let (tree, _) = add_pre_commit(tree, opts()).unwrap();
        assert_eq!(tree.file(&["foo", ".isort.cfg"]), Some("mine"));
    }
}
