pub mod options;
pub mod pipeline;
pub mod project_tree;
pub mod template;

pub use crate::domain::DomainError;
pub use options::Options;
pub use pipeline::{Action, Pipeline, PipelineBuilder, Placement};
pub use project_tree::{MergeMode, ProjectTree, TreeNode};
pub use template::TemplateSource;
