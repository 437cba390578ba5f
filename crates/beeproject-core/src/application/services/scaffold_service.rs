//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Register the requested extensions on the base pipeline
//! 2. Run the pipeline over an empty project tree
//! 3. Write the resulting tree through the [`Filesystem`] port

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Options, ProjectTree, keys},
    error::BeeResult,
    extensions::{self, ExtensionRef},
};

/// What to do when the project directory already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Refuse to touch an existing project.
    #[default]
    Create,
    /// Add missing files, keep every file that is already there.
    Update,
    /// Write every file, replacing existing ones.
    Force,
}

/// Input for a generation run.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub options: Options,
    pub extensions: Vec<ExtensionRef>,
    /// Directory the project folder is created in.
    pub output_root: PathBuf,
    pub mode: WriteMode,
}

impl ScaffoldRequest {
    pub fn new(options: Options, output_root: impl Into<PathBuf>) -> Self {
        Self {
            options,
            extensions: Vec::new(),
            output_root: output_root.into(),
            mode: WriteMode::default(),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<ExtensionRef>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Result of running the pipeline, before anything touches the disk.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub tree: ProjectTree,
    /// Options after defaults were filled in.
    pub options: Options,
    /// Action names in execution order.
    pub actions: Vec<&'static str>,
}

/// Outcome of a successful [`ScaffoldService::scaffold`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScaffoldReport {
    pub project_root: PathBuf,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Information about an extension for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionInfo {
    pub name: String,
    pub flag: String,
    pub help: String,
}

impl From<&ExtensionRef> for ExtensionInfo {
    fn from(ext: &ExtensionRef) -> Self {
        Self {
            name: ext.name().to_owned(),
            flag: format!("--{}", ext.flag()),
            help: ext.help(),
        }
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Run the pipeline without writing anything.
    #[instrument(skip_all, fields(extensions = request.extensions.len()))]
    pub fn plan(&self, request: &ScaffoldRequest) -> BeeResult<ScaffoldPlan> {
        let pipeline = extensions::assemble(&request.extensions)?;
        let actions = pipeline.names();
        debug!(?actions, "pipeline resolved");

        let (tree, options) = pipeline.run(ProjectTree::new(), request.options.clone())?;
        info!(files = tree.file_count(), "project tree built");

        Ok(ScaffoldPlan {
            tree,
            options,
            actions,
        })
    }

    /// Generate the project on disk.
    #[instrument(
        skip_all,
        fields(output_root = %request.output_root.display(), mode = ?request.mode)
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> BeeResult<ScaffoldReport> {
        let plan = self.plan(request)?;
        let project = plan.options.require(keys::PROJECT)?;
        let project_root = request.output_root.join(project);

        let existed = self.filesystem.exists(&project_root);
        if existed && request.mode == WriteMode::Create {
            return Err(ApplicationError::ProjectExists { path: project_root }.into());
        }

        let mut report = ScaffoldReport {
            project_root,
            ..ScaffoldReport::default()
        };

        match self.write_tree(&plan.tree, &request.output_root, request.mode, &mut report) {
            Ok(()) => {
                info!(
                    written = report.written.len(),
                    skipped = report.skipped.len(),
                    "Scaffold completed successfully"
                );
                Ok(report)
            }
            Err(e) if !existed => {
                warn!("Write failed, attempting rollback");
                self.rollback(&report.project_root);
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Write failed inside an existing project, nothing rolled back");
                Err(e)
            }
        }
    }

    /// All built-in extensions.
    pub fn list_extensions(&self) -> Vec<ExtensionInfo> {
        extensions::builtin_extensions()
            .iter()
            .map(ExtensionInfo::from)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_tree(
        &self,
        tree: &ProjectTree,
        output_root: &Path,
        mode: WriteMode,
        report: &mut ScaffoldReport,
    ) -> BeeResult<()> {
        self.filesystem.create_dir_all(&report.project_root)?;

        for (rel, content) in tree.files() {
            let path = output_root.join(&rel);
            if mode == WriteMode::Update && self.filesystem.exists(&path) {
                debug!(path = %path.display(), "exists, skipping");
                report.skipped.push(rel);
                continue;
            }
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, content)?;
            report.written.push(rel);
        }

        for dir in tree.empty_directories() {
            self.filesystem.create_dir_all(&output_root.join(dir))?;
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
