//! beeproject Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the beeproject
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          beeproject-cli (CLI)           │
//! │   (flags -> extensions -> request)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌──────────────────────┐ ┌────────────────┐
//! │  Extensions + base   │ │  Ports         │
//! │  pipeline actions    │ │  (Filesystem)  │
//! └──────────┬───────────┘ └───────┬────────┘
//!            │                     │ implemented by
//!            ▼                     ▼
//! ┌──────────────────────┐ ┌────────────────┐
//! │  Domain (pure)       │ │  beeproject-   │
//! │  ProjectTree,        │ │  adapters      │
//! │  Options, Pipeline   │ │                │
//! └──────────────────────┘ └────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use beeproject_core::prelude::*;
//! # fn run(filesystem: Box<dyn Filesystem>) -> BeeResult<()> {
//!
//! let request = ScaffoldRequest::new(Options::new().with(keys::PROJECT, "foo"), ".")
//!     .with_extensions(resolve_activations(&[find_extension("beeproject").unwrap()]));
//!
//! let report = ScaffoldService::new(filesystem).scaffold(&request)?;
//! println!("{} files written", report.written.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod base;
pub mod extensions;
pub mod templates;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ExtensionInfo, ScaffoldPlan, ScaffoldReport, ScaffoldRequest, ScaffoldService, WriteMode,
        ports::Filesystem,
    };
    pub use crate::domain::{MergeMode, Options, Pipeline, ProjectTree, keys};
    pub use crate::error::{BeeError, BeeResult, ErrorCategory};
    pub use crate::extensions::{
        Extension, ExtensionRef, builtin_extensions, find_extension, resolve_activations,
    };
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
