//! Extensions: optional bundles of pipeline actions.
//!
//! An extension is activated by a command-line flag. Activation returns the
//! list of extensions to enable (usually just itself). Once every flag has
//! been collected, each enabled extension registers its actions on the base
//! pipeline via [`Extension::activate`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::base;
use crate::domain::{DomainResult, Pipeline, PipelineBuilder};

pub mod beeproject;
pub mod markdown;
pub mod no_skeleton;
pub mod pre_commit;

pub use beeproject::BeeProject;
pub use markdown::Markdown;
pub use no_skeleton::NoSkeleton;
pub use pre_commit::PreCommit;

/// Shared handle to an extension.
pub type ExtensionRef = Arc<dyn Extension>;

/// A self-contained unit of project-generation logic.
pub trait Extension: fmt::Debug + Send + Sync {
    /// Identifier, in `snake_case`.
    fn name(&self) -> &'static str;

    /// One-line description, starting with a capital letter.
    fn description(&self) -> &'static str;

    /// Long command-line flag, without the leading dashes.
    fn flag(&self) -> String {
        self.name().replace('_', "-")
    }

    /// Help text shown next to the flag.
    fn help(&self) -> String {
        let description = self.description();
        let mut chars = description.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Register this extension's actions.
    fn activate(&self, builder: PipelineBuilder) -> PipelineBuilder;

    /// Extensions enabled when this extension's flag is given.
    fn on_flag(&self) -> Vec<ExtensionRef>;
}

/// Every extension shipped with beeproject, in flag order.
pub fn builtin_extensions() -> Vec<ExtensionRef> {
    vec![
        Arc::new(BeeProject),
        Arc::new(Markdown),
        Arc::new(NoSkeleton),
        Arc::new(PreCommit),
    ]
}

/// Look up a built-in extension by name or flag.
pub fn find_extension(name: &str) -> Option<ExtensionRef> {
    builtin_extensions()
        .into_iter()
        .find(|ext| ext.name() == name || ext.flag() == name)
}

/// Expand the flags that were given into the extensions to activate.
///
/// Each flag contributes its [`Extension::on_flag`] list, in flag order. An
/// extension enabled by more than one flag keeps its first position.
pub fn resolve_activations<'a>(flags: impl IntoIterator<Item = &'a ExtensionRef>) -> Vec<ExtensionRef> {
    let mut seen = HashSet::new();
    let mut activated = Vec::new();
    for ext in flags.into_iter().flat_map(|flag| flag.on_flag()) {
        if seen.insert(ext.name()) {
            activated.push(ext);
        } else {
            debug!(extension = ext.name(), "already activated, skipping");
        }
    }
    activated
}

/// Register `extensions` on the base pipeline and resolve the final order.
pub fn assemble(extensions: &[ExtensionRef]) -> DomainResult<Pipeline> {
    let builder = extensions
        .iter()
        .fold(base::base_pipeline(), |builder, ext| {
            debug!(extension = ext.name(), "activating");
            ext.activate(builder)
        });
    builder.build()
}
