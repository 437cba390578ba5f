use std::sync::Arc;

use tracing::debug;

use super::{Extension, ExtensionRef};
use crate::base::DEFINE_STRUCTURE;
use crate::domain::{
    Action, DomainResult, MergeMode, Options, PipelineBuilder, Placement, ProjectTree,
    TemplateSource, keys,
};
use crate::templates::markdown as tpl;

pub const CONVERT_TO_MARKDOWN: &str = "convert_to_markdown";

const RST_LONG_DESCRIPTION: &str = "long_description = file: README.rst";
const MD_LONG_DESCRIPTION: &str =
    "long_description = file: README.md\nlong_description_content_type = text/markdown";

/// Replaces the reStructuredText documents with Markdown ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

impl Extension for Markdown {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn description(&self) -> &'static str {
        "Use Markdown instead of reStructuredText for README, AUTHORS and CHANGELOG"
    }

    fn activate(&self, builder: PipelineBuilder) -> PipelineBuilder {
        builder.register(
            Action::new(CONVERT_TO_MARKDOWN, build),
            Placement::After(DEFINE_STRUCTURE),
        )
    }

    fn on_flag(&self) -> Vec<ExtensionRef> {
        vec![Arc::new(*self)]
    }
}

/// Swap `README.rst` for a default `README.md`.
///
/// `AUTHORS` and `CHANGELOG` are converted only when their `.rst` version is
/// part of the tree. `setup.cfg` is pointed at the Markdown readme.
pub fn build(mut tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?;

    tree.reject(&[project, "README.rst"]);
    tree.ensure(
        &[project, "README.md"],
        tpl::README_MD.render(&options)?,
        MergeMode::NoOverwrite,
    )?;

    convert(&mut tree, &options, project, "AUTHORS", tpl::AUTHORS_MD)?;
    convert(&mut tree, &options, project, "CHANGELOG", tpl::CHANGELOG_MD)?;

    let patched = tree.modify(&[project, "setup.cfg"], |cfg| {
        cfg.replace(RST_LONG_DESCRIPTION, MD_LONG_DESCRIPTION)
    });
    debug!(project, setup_cfg = patched, "converted to markdown");

    Ok((tree, options))
}

fn convert(
    tree: &mut ProjectTree,
    options: &Options,
    project: &str,
    stem: &str,
    template: TemplateSource,
) -> DomainResult<()> {
    let rst = format!("{stem}.rst");
    if tree.reject(&[project, rst.as_str()]).is_some() {
        let md = format!("{stem}.md");
        tree.ensure(&[project, md.as_str()], template.render(options)?, MergeMode::NoOverwrite)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base;

    fn base_tree() -> (ProjectTree, Options) {
        base::base_pipeline()
            .build()
            .unwrap()
            .run(ProjectTree::new(), Options::new().with(keys::PROJECT, "foo"))
            .unwrap()
    }

    #[test]
    fn converts_rst_documents() {
        let (tree, opts) = base_tree();
        let (tree, _) = build(tree, opts).unwrap();

        for gone in ["README.rst", "AUTHORS.rst", "CHANGELOG.rst"] {
            assert!(!tree.contains(&["foo", gone]), "{gone} still present");
        }
        for added in ["README.md", "AUTHORS.md", "CHANGELOG.md"] {
            assert!(tree.contains(&["foo", added]), "{added} missing");
        }

        let cfg = tree.file(&["foo", "setup.cfg"]).unwrap();
        assert!(cfg.contains("long_description = file: README.md"));
        assert!(cfg.contains("text/markdown"));
        assert!(!cfg.contains("README.rst"));
    }

    #[test]
    fn running_twice_changes_nothing() {
        let (tree, opts) = base_tree();
        let (once, opts) = build(tree, opts).unwrap();
        let (twice, _) = build(once.clone(), opts).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn does_not_invent_missing_documents() {
        let opts = Options::new()
            .with(keys::PROJECT, "foo")
            .with(keys::DESCRIPTION, "d");
        let (tree, _) = build(ProjectTree::new(), opts).unwrap();

        assert_eq!(tree.file_count(), 1);
        assert!(tree.contains(&["foo", "README.md"]));
    }

    #[test]
    fn existing_readme_md_is_kept() {
        let mut tree = ProjectTree::new();
        tree.ensure(&["foo", "README.md"], "mine", MergeMode::NoOverwrite)
            .unwrap();
        let opts = Options::new()
            .with(keys::PROJECT, "foo")
            .with(keys::DESCRIPTION, "d");
        let (tree, _) = build(tree, opts).unwrap();
        assert_eq!(tree.file(&["foo", "README.md"]), Some("mine"));
    }
}
