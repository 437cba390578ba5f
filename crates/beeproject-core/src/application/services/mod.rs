//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the extensions and the ports to
//! accomplish high-level use cases like "scaffold a project".

pub mod scaffold_service;

pub use scaffold_service::{
    ExtensionInfo, ScaffoldPlan, ScaffoldReport, ScaffoldRequest, ScaffoldService, WriteMode,
};
