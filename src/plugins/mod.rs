//! Plugin discovery for ReplCalc
//!
//! Plugins are the commands the top-level menu offers. They come from two
//! candidate sources: the compiled-in catalog, and an optional directory of
//! JSON-defined plugins. Each candidate is loaded on its own; one broken
//! candidate is logged and left out while the rest still register.
//!
//! # Architecture
//!
//! - **types**: candidates, modules, exports, manifests and the discovery report
//! - **loader**: the `Discoverer`, the `CandidateSource` trait and the filesystem source
//! - **catalog**: the compiled-in top-level plugins and calculator operations
//!
//! # Plugin Directory Structure
//!
//! ```text
//! ~/.replcalc/plugins/
//! ├── hello/
//! │   └── plugin.json
//! └── quit/
//!     └── plugin.json
//! ```
//!
//! # Usage
//!
//! ```rust
//! use replcalc::calculator::History;
//! use replcalc::commands::CommandRegistry;
//! use replcalc::plugins::{builtin_plugins, Discoverer};
//!
//! let mut registry = CommandRegistry::new();
//! let report = Discoverer::default().discover(&builtin_plugins(History::shared()), &mut registry);
//!
//! assert_eq!(registry.list(), vec!["calculator", "discord", "exit", "greet"]);
//! assert!(report.failures.is_empty());
//! ```

mod catalog;
mod loader;
pub mod types;

pub use catalog::{builtin_plugins, operation_plugins, PluginCatalog};
pub use loader::{
    load_manifest_module, validate_plugin_name, CandidateSource, Discoverer, ManifestDir,
    CONVENTION_SUFFIX, MANIFEST_FILE,
};
pub use types::{
    Candidate, CandidateKind, DiscoveryFailure, DiscoveryReport, DiscoveryStrategy, Export,
    ExportKind, PluginManifest, PluginModule,
};
