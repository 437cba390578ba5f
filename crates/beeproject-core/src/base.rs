//! Host actions every generation run starts with.
//!
//! Extensions anchor their own actions on these names, most commonly
//! [`DEFINE_STRUCTURE`].

use chrono::Datelike;

use crate::domain::{
    Action, DomainError, DomainResult, MergeMode, Options, PipelineBuilder, ProjectTree, keys,
};
use crate::templates::base as tpl;

pub const GET_DEFAULT_OPTIONS: &str = "get_default_options";
pub const VERIFY_OPTIONS_CONSISTENCY: &str = "verify_options_consistency";
pub const DEFINE_STRUCTURE: &str = "define_structure";

pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_VERSION: &str = "0.1.0";
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";

/// Reserved words of Python 3; none of them can name an importable package.
pub const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Pipeline builder holding the three base actions, in order.
pub fn base_pipeline() -> PipelineBuilder {
    PipelineBuilder::new([
        Action::new(GET_DEFAULT_OPTIONS, get_default_options),
        Action::new(VERIFY_OPTIONS_CONSISTENCY, verify_options_consistency),
        Action::new(DEFINE_STRUCTURE, define_structure),
    ])
}

/// Fill every option the templates need but the caller left out.
///
/// Only `project` is mandatory; everything else is derived or defaulted.
pub fn get_default_options(
    tree: ProjectTree,
    mut options: Options,
) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?.to_owned();

    options.set_default(keys::PACKAGE, |_| to_package_name(&project));
    options.set_default(keys::DESCRIPTION, |_| format!("Add a short description for {project}"));
    options.set_default(keys::AUTHOR, |_| "Your Name".into());
    options.set_default(keys::EMAIL, |_| "you@example.com".into());
    options.set_default(keys::LICENSE, |_| DEFAULT_LICENSE.into());
    options.set_default(keys::URL, |o| {
        let author = o.get(keys::AUTHOR).unwrap_or_default();
        format!("https://github.com/{}/{project}", to_package_name(author))
    });
    options.set_default(keys::VERSION, |_| DEFAULT_VERSION.into());
    options.set_default(keys::YEAR, |_| chrono::Local::now().year().to_string());
    options.set_default(keys::PYTHON_VERSION, |_| DEFAULT_PYTHON_VERSION.into());

    Ok((tree, options))
}

/// Reject option values that cannot produce a valid project.
///
/// # Errors
///
/// [`DomainError::InvalidOption`] when `project` is not a usable directory
/// name or `package` is not a Python identifier.
pub fn verify_options_consistency(
    tree: ProjectTree,
    options: Options,
) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?;
    if project.trim().is_empty() {
        return Err(invalid(keys::PROJECT, "must not be empty"));
    }
    if project.starts_with('.') {
        return Err(invalid(keys::PROJECT, "must not start with '.'"));
    }
    if project.contains(['/', '\\']) {
        return Err(invalid(keys::PROJECT, "must be a single directory name"));
    }

    let package = options.require(keys::PACKAGE)?;
    if !is_python_identifier(package) {
        return Err(invalid(
            keys::PACKAGE,
            "must be a valid Python identifier (letters, digits and '_', not starting with a digit)",
        ));
    }
    if is_python_keyword(package) {
        return Err(invalid(keys::PACKAGE, "must not be a Python keyword"));
    }

    Ok((tree, options))
}

/// Lay out the default Python package.
///
/// Runs with [`MergeMode::Overwrite`]: this is the first writer of every path
/// it touches, so later extensions decide what survives.
pub fn define_structure(
    mut tree: ProjectTree,
    options: Options,
) -> DomainResult<(ProjectTree, Options)> {
    let project = options.require(keys::PROJECT)?;
    let package = options.require(keys::PACKAGE)?;

    let files = [
        (vec![".gitignore"], tpl::GITIGNORE),
        (vec!["README.rst"], tpl::README_RST),
        (vec!["AUTHORS.rst"], tpl::AUTHORS_RST),
        (vec!["CHANGELOG.rst"], tpl::CHANGELOG_RST),
        (vec!["LICENSE.txt"], tpl::LICENSE),
        (vec!["requirements.txt"], tpl::REQUIREMENTS),
        (vec!["setup.py"], tpl::SETUP_PY),
        (vec!["setup.cfg"], tpl::SETUP_CFG),
        (vec!["src", package, "__init__.py"], tpl::PACKAGE_INIT),
        (vec!["src", package, "skeleton.py"], tpl::SKELETON),
        (vec!["tests", "conftest.py"], tpl::CONFTEST),
        (vec!["tests", "test_skeleton.py"], tpl::TEST_SKELETON),
    ];

    for (rel, template) in files {
        let mut path = vec![project];
        path.extend(rel);
        tree.ensure(&path, template.render(&options)?, MergeMode::Overwrite)?;
    }

    Ok((tree, options))
}

fn invalid(key: &str, reason: &str) -> DomainError {
    DomainError::InvalidOption {
        key: key.to_owned(),
        reason: reason.to_owned(),
    }
}

/// `My-Project 2` -> `my_project_2`, `class` -> `class_`
pub fn to_package_name(name: &str) -> String {
    let mut out: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_python_keyword(&out) {
        out.push('_');
    }
    out
}

fn is_python_keyword(s: &str) -> bool {
    PYTHON_KEYWORDS.contains(&s)
}

fn is_python_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(project: &str) -> Options {
        let (_, opts) =
            get_default_options(ProjectTree::new(), Options::new().with(keys::PROJECT, project))
                .unwrap();
        opts
    }

    #[test]
    fn package_is_derived_from_project() {
        assert_eq!(defaults("My-Project").get(keys::PACKAGE), Some("my_project"));
        assert_eq!(defaults("2fast").get(keys::PACKAGE), Some("_2fast"));
    }

    #[test]
    fn explicit_options_win_over_defaults() {
        let opts = Options::new()
            .with(keys::PROJECT, "foo")
            .with(keys::PACKAGE, "bar")
            .with(keys::LICENSE, "Apache-2.0");
        let (_, opts) = get_default_options(ProjectTree::new(), opts).unwrap();

        assert_eq!(opts.get(keys::PACKAGE), Some("bar"));
        assert_eq!(opts.get(keys::LICENSE), Some("Apache-2.0"));
        assert_eq!(opts.get(keys::VERSION), Some(DEFAULT_VERSION));
        assert!(opts.get(keys::YEAR).is_some_and(|y| y.len() == 4));
    }

    #[test]
    fn defaults_require_project() {
        let err = get_default_options(ProjectTree::new(), Options::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingOption {
                key: "project".into()
            }
        );
    }

    #[test]
    fn consistency_rejects_bad_names() {
        for (project, package) in [("", "foo"), (".hidden", "foo"), ("a/b", "foo")] {
            let opts = Options::new()
                .with(keys::PROJECT, project)
                .with(keys::PACKAGE, package);
            assert!(
                verify_options_consistency(ProjectTree::new(), opts).is_err(),
                "{project:?} should be rejected"
            );
        }

        for package in ["1abc", "my-pkg", "", "ümlaut"] {
            let opts = Options::new()
                .with(keys::PROJECT, "foo")
                .with(keys::PACKAGE, package);
            let err = verify_options_consistency(ProjectTree::new(), opts).unwrap_err();
            assert!(matches!(err, DomainError::InvalidOption { ref key, .. } if key == "package"));
        }
    }

    #[test]
    fn keyword_package_is_rejected() {
        for package in ["class", "import", "None", "async"] {
            let opts = Options::new()
                .with(keys::PROJECT, "foo")
                .with(keys::PACKAGE, package);
            let err = verify_options_consistency(ProjectTree::new(), opts).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidOption { ref key, ref reason }
                    if key == "package" && reason.contains("keyword")),
                "{package:?} should be rejected"
            );
        }
    }

    #[test]
    fn keyword_project_gets_a_usable_package() {
        assert_eq!(to_package_name("class"), "class_");
        assert_eq!(to_package_name("From"), "from_");
        assert_eq!(to_package_name("classy"), "classy");

        let (tree, opts) = base_pipeline()
            .build()
            .unwrap()
            .run(ProjectTree::new(), Options::new().with(keys::PROJECT, "class"))
            .unwrap();
        assert_eq!(opts.get(keys::PACKAGE), Some("class_"));
        assert!(tree.contains(&["class", "src", "class_", "__init__.py"]));
    }

    #[test]
    fn consistency_accepts_valid_names() {
        let opts = Options::new()
            .with(keys::PROJECT, "my-project")
            .with(keys::PACKAGE, "my_project");
        assert!(verify_options_consistency(ProjectTree::new(), opts).is_ok());
    }

    #[test]
    fn base_pipeline_lays_out_a_package() {
        let pipeline = base_pipeline().build().unwrap();
        assert_eq!(
            pipeline.names(),
            vec![GET_DEFAULT_OPTIONS, VERIFY_OPTIONS_CONSISTENCY, DEFINE_STRUCTURE]
        );

        let (tree, _) = pipeline
            .run(ProjectTree::new(), Options::new().with(keys::PROJECT, "foo"))
            .unwrap();

        assert_eq!(tree.file_count(), 12);
        assert!(tree.contains(&["foo", "requirements.txt"]));
        assert!(tree.contains(&["foo", "src", "foo", "skeleton.py"]));
        assert!(tree.contains(&["foo", "tests", "test_skeleton.py"]));
        assert!(
            tree.file(&["foo", "setup.cfg"])
                .is_some_and(|c| c.contains("long_description = file: README.rst"))
        );
    }

    #[test]
    fn define_structure_overwrites() {
        let mut tree = ProjectTree::new();
        tree.ensure(&["foo", "setup.py"], "stale", MergeMode::Overwrite)
            .unwrap();
        let (tree, _) = define_structure(tree, defaults("foo")).unwrap();
        assert_ne!(tree.file(&["foo", "setup.py"]), Some("stale"));
    }
}
