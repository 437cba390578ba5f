//! Core domain layer for beeproject.
//!
//! This module contains pure logic with no I/O. Extensions describe a project
//! by transforming a [`ProjectTree`]; writing it to disk is handled via the
//! `Filesystem` port defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Spans and events are emitted by the callers
//! - **Values in, values out**: actions take and return the tree by value
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Re-exports for convenience
pub use entities::{
    options::{Options, keys},
    pipeline::{Action, ActionFn, Pipeline, PipelineBuilder, Placement},
    project_tree::{MergeMode, ProjectTree, TreeNode},
    template::{Escape, TemplateSource, render, render_escaped},
};

pub use error::{DomainError, DomainResult, ErrorCategory};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Actions composed over a shared tree
    // ========================================================================

    fn readme(mut tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
        let project = options.require(keys::PROJECT)?.to_owned();
        let content = render("readme", "# {{ project }}\n", &options)?;
        tree.ensure(&[project.as_str(), "README.md"], content, MergeMode::NoOverwrite)?;
        Ok((tree, options))
    }

    fn custom_readme(
        mut tree: ProjectTree,
        options: Options,
    ) -> DomainResult<(ProjectTree, Options)> {
        let project = options.require(keys::PROJECT)?.to_owned();
        let path = [project.as_str(), "README.md"];
        tree.reject(&path);
        tree.ensure(&path, "custom", MergeMode::NoOverwrite)?;
        Ok((tree, options))
    }

    #[test]
    fn reject_then_ensure_replaces_content() {
        let pipeline = PipelineBuilder::new([Action::new("readme", readme)])
            .register(Action::new("custom", custom_readme), Placement::After("readme"))
            .build()
            .unwrap();

        let options = Options::new().with(keys::PROJECT, "foo");
        let (tree, options_out) = pipeline.run(ProjectTree::new(), options.clone()).unwrap();

        assert_eq!(tree.file(&["foo", "README.md"]), Some("custom"));
        assert_eq!(options_out, options);
    }

    #[test]
    fn no_overwrite_alone_cannot_replace() {
        let options = Options::new().with(keys::PROJECT, "foo");
        let (mut tree, _) = readme(ProjectTree::new(), options).unwrap();

        tree.ensure(&["foo", "README.md"], "custom", MergeMode::NoOverwrite)
            .unwrap();
        assert_eq!(tree.file(&["foo", "README.md"]), Some("# foo\n"));
    }

    #[test]
    fn error_categories() {
        assert_eq!(
            DomainError::MissingOption { key: "x".into() }.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::PathConflict {
                path: "x".into(),
                reason: "y".into()
            }
            .category(),
            ErrorCategory::Conflict
        );
        assert_eq!(
            DomainError::UnknownAnchor {
                action: "a".into(),
                anchor: "b".into()
            }
            .category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn invalid_package_suggestion_mentions_identifiers() {
        let err = DomainError::InvalidOption {
            key: "package".into(),
            reason: "not an identifier".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("identifier")));
    }
}
