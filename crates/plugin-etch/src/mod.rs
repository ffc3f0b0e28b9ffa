//! plugin-etch: Documentation generator for simulation plugins
//!
//! This crate generates reStructuredText documentation for the plugins
//! loaded into a simulation environment by:
//! - Listing every plugin and the interfaces it advertises
//! - Instantiating each interface and asking it for `help` text
//! - Writing one page per interface, grouped by interface type
//! - Writing a plugins index stamped with version-control metadata
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐
//! │  Environment    │    │  VersionControl  │
//! │ (plugins, help) │    │  (svn stat/info) │
//! └────────┬────────┘    └────────┬─────────┘
//!          │                      │
//!          ▼                      │
//!  ┌─────────────────┐            │
//!  │ InterfaceGroups │            │
//!  └────────┬────────┘            │
//!           ▼                     ▼
//!  ┌─────────────────┐    ┌──────────────────┐
//!  │ interfaces.rst  │    │   plugins.rst    │
//!  └─────────────────┘    └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use plugin_etch::{CatalogEnvironment, DocBuilder};
//!
//! let env = CatalogEnvironment::load("plugins.toml").expect("catalog");
//! let output = DocBuilder::new("sphinx")
//!     .subversion()
//!     .build(env)
//!     .expect("Failed to generate docs");
//! println!("{} files written", output.files.len());
//! ```

// Core types
pub mod interface_type;
pub mod plugin;

// Collaborators
pub mod environment;
pub mod vcs;

// Output and errors
pub mod diagnostics;
pub mod rst;

// Submodules
pub mod builder;
pub mod docgen;

// Re-exports for convenience
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, EtchError, EtchResult};
pub use environment::{CatalogEnvironment, Environment, EnvironmentScope, Interface};
pub use interface_type::{InterfaceType, UnknownInterfaceType};
pub use plugin::{display_name, PluginInfo, PluginRecord};
pub use vcs::{NoVersionControl, Subversion, VcsInfo, VersionControl};

// Builder API
pub use builder::{BuildOutput, DocBuilder};

// Documentation generation
pub use docgen::{InterfaceGroups, InterfaceRecord, PluginsPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
