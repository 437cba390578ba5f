use std::sync::Arc;

use tracing::debug;

use super::{Extension, ExtensionRef};
use crate::base::DEFINE_STRUCTURE;
use crate::domain::{Action, DomainResult, Options, PipelineBuilder, Placement, ProjectTree, keys};

pub const REMOVE_SKELETON: &str = "remove_skeleton";

/// Drops the example module and its test from the base layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSkeleton;

impl Extension for NoSkeleton {
    fn name(&self) -> &'static str {
        "no_skeleton"
    }

    fn description(&self) -> &'static str {
        "Omit the example skeleton module and its test"
    }

    fn activate(&self, builder: PipelineBuilder) -> PipelineBuilder {
        builder.register(
            Action::new(REMOVE_SKELETON, remove_skeleton),
            Placement::After(DEFINE_STRUCTURE),
        )
    }

    fn on_flag(&self) -> Vec<ExtensionRef> {
        vec![Arc::new(*self)]
    }
}

pub fn remove_skeleton(
    mut tree: ProjectTree,
    options: Options,
) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?;
    let package = options.require(keys::PACKAGE)?;

    let removed = [
        tree.reject(&[project, "src", package, "skeleton.py"]),
        tree.reject(&[project, "tests", "test_skeleton.py"]),
    ];
    debug!(
        removed = removed.iter().flatten().count(),
        "skeleton files rejected"
    );

    Ok((tree, options))
}
