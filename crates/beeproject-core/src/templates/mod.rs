//! Built-in file templates.
//!
//! Every template is embedded at compile time from the crate's `templates/`
//! directory and rendered with [`TemplateSource::render`].

use crate::domain::TemplateSource;

macro_rules! template {
    ($(#[$meta:meta])* json $name:ident, $path:literal) => {
        $(#[$meta])*
        pub const $name: TemplateSource =
            TemplateSource::json($path, include_str!(concat!("../../templates/", $path)));
    };
    ($(#[$meta:meta])* $name:ident, $path:literal) => {
        $(#[$meta])*
        pub const $name: TemplateSource =
            TemplateSource::new($path, include_str!(concat!("../../templates/", $path)));
    };
}

/// Layout every project starts from.
pub mod base {
    use super::*;

    template!(GITIGNORE, "base/gitignore");
    template!(README_RST, "base/README.rst");
    template!(AUTHORS_RST, "base/AUTHORS.rst");
    template!(CHANGELOG_RST, "base/CHANGELOG.rst");
    template!(LICENSE, "base/LICENSE.txt");
    template!(REQUIREMENTS, "base/requirements.txt");
    template!(SETUP_PY, "base/setup.py");
    template!(SETUP_CFG, "base/setup.cfg");
    template!(PACKAGE_INIT, "base/package_init.py");
    template!(SKELETON, "base/skeleton.py");
    template!(CONFTEST, "base/conftest.py");
    template!(TEST_SKELETON, "base/test_skeleton.py");
}

/// Data-science layout.
pub mod beeproject {
    use super::*;

    template!(
        /// Ignore rules for `data/`: keep the folder layout, never the data.
        GITIGNORE_DATA,
        "beeproject/gitignore_data"
    );
    template!(
        /// Ignore everything except the marker itself.
        GITIGNORE_ALL,
        "beeproject/gitignore_all"
    );
    template!(
        /// Jupyter notebook; values are JSON-escaped.
        json NOTEBOOK,
        "beeproject/template.ipynb"
    );
    template!(ENVIRONMENT_YAML, "beeproject/environment.yaml");
    template!(RUN_PROJECT_MAIN, "beeproject/run_project_main.py");
    template!(PROJECT_CONFIG, "beeproject/project_config.yaml");
    template!(SETTINGS, "beeproject/settings.py");
    template!(MANAGE, "beeproject/manage.py");
    template!(COMPAT, "beeproject/_compat.py");
    template!(POSTGRESQL, "beeproject/postgresql_operations.py");
    template!(SUBMODULE_INIT, "beeproject/submodule_init.py");
    template!(SUBMODULE_MANAGE, "beeproject/submodule_manage.py");
    template!(README_MD, "beeproject/README.md");
}

pub mod markdown {
    use super::*;

    template!(README_MD, "markdown/README.md");
    template!(AUTHORS_MD, "markdown/AUTHORS.md");
    template!(CHANGELOG_MD, "markdown/CHANGELOG.md");
}

pub mod pre_commit {
    use super::*;

    template!(PRE_COMMIT_CONFIG, "pre_commit/pre-commit-config.yaml");
    template!(ISORT_CFG, "pre_commit/isort.cfg");
}
