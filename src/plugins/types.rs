//! Plugin types for ReplCalc
//!
//! This module defines the types used by plugin discovery: candidates and the
//! modules they load into, the exports a module offers, the `plugin.json`
//! manifest for filesystem plugins, and the report a discovery pass produces.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::commands::Command;
use crate::error::{CalcError, Result};

/// Builds one command instance.
pub type CommandFactory = Rc<dyn Fn() -> Result<Rc<dyn Command>>>;

/// Loads a candidate into a module. Called at most once per discovery pass.
pub type ModuleLoader = Rc<dyn Fn() -> Result<PluginModule>>;

/// How a symbol exported by a plugin module relates to the command capability.
#[derive(Clone)]
pub enum ExportKind {
    /// A concrete type implementing `Command`.
    Command(CommandFactory),
    /// The command capability itself, visible in the module but never instantiated.
    AbstractBase,
    /// Anything else the module exposes.
    Other,
}

/// A named symbol exported by a plugin module.
#[derive(Clone)]
pub struct Export {
    pub symbol: String,
    pub kind: ExportKind,
}

impl Export {
    /// A concrete command type built by `factory`.
    pub fn command<F>(symbol: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Rc<dyn Command>> + 'static,
    {
        Self {
            symbol: symbol.into(),
            kind: ExportKind::Command(Rc::new(factory)),
        }
    }

    /// The command capability re-exported by a module.
    pub fn abstract_base(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: ExportKind::AbstractBase,
        }
    }

    /// A symbol unrelated to commands.
    pub fn other(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: ExportKind::Other,
        }
    }

    /// Whether this export can be instantiated as a command.
    pub fn is_concrete_command(&self) -> bool {
        matches!(self.kind, ExportKind::Command(_))
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ExportKind::Command(_) => "command",
            ExportKind::AbstractBase => "abstract",
            ExportKind::Other => "other",
        };
        f.debug_struct("Export")
            .field("symbol", &self.symbol)
            .field("kind", &kind)
            .finish()
    }
}

/// A successfully loaded candidate and its exports, in declaration order.
#[derive(Debug, Clone)]
pub struct PluginModule {
    pub name: String,
    pub exports: Vec<Export>,
}

impl PluginModule {
    pub fn new(name: impl Into<String>, exports: Vec<Export>) -> Self {
        Self {
            name: name.into(),
            exports,
        }
    }

    /// Look up an export by exact symbol name.
    pub fn export(&self, symbol: &str) -> Option<&Export> {
        self.exports.iter().find(|e| e.symbol == symbol)
    }
}

/// What a candidate turned out to be when enumerated.
#[derive(Clone)]
pub enum CandidateKind {
    /// A leaf that can be loaded into a module.
    Module(ModuleLoader),
    /// A container of other candidates with nothing loadable of its own.
    Namespace,
}

/// A discoverable unit that may or may not yield a command.
#[derive(Clone)]
pub struct Candidate {
    pub name: String,
    pub kind: CandidateKind,
}

impl Candidate {
    /// A leaf candidate loaded by `loader`.
    pub fn module<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<PluginModule> + 'static,
    {
        Self {
            name: name.into(),
            kind: CandidateKind::Module(Rc::new(loader)),
        }
    }

    /// A leaf candidate whose module is already known.
    pub fn with_exports(name: impl Into<String>, exports: Vec<Export>) -> Self {
        let name = name.into();
        let module = PluginModule::new(name.clone(), exports);
        Self::module(name, move || Ok(module.clone()))
    }

    /// A container candidate.
    pub fn namespace(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CandidateKind::Namespace,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.kind, CandidateKind::Namespace)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("namespace", &self.is_namespace())
            .finish()
    }
}

/// How the discoverer picks the command type out of a loaded module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// First export that is a concrete command, in declaration order.
    #[default]
    Structural,
    /// The export named after the candidate, e.g. `greet` → `GreetCommand`.
    Convention,
}

impl FromStr for DiscoveryStrategy {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "structural" => Ok(Self::Structural),
            "convention" | "name-convention" => Ok(Self::Convention),
            other => Err(CalcError::Config(format!(
                "Unknown discovery strategy '{}': expected 'structural' or 'convention'",
                other
            ))),
        }
    }
}

/// The manifest loaded from a filesystem plugin's `plugin.json` file.
///
/// # Example
///
/// ```json
/// {
///   "description": "Says hi",
///   "exports": [
///     { "symbol": "Command", "kind": "abstract" },
///     { "symbol": "HelloCommand", "kind": "message", "message": "Hi there!" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Human-readable description of what the plugin provides.
    #[serde(default)]
    pub description: Option<String>,

    /// Symbols the plugin exports, in declaration order.
    pub exports: Vec<ExportDef>,
}

/// One export declared in a `plugin.json` manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDef {
    pub symbol: String,

    #[serde(flatten)]
    pub kind: ExportDefKind,
}

/// The kinds of export a manifest can declare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportDefKind {
    /// A command that prints `message`.
    Message { message: String },
    /// Re-export of a compiled-in command with the same symbol.
    Builtin,
    /// The command capability itself.
    Abstract,
}

/// A candidate that failed to load or instantiate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFailure {
    pub candidate: String,
    pub error: String,
}

/// Outcome of one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Registered command names, in registration order.
    pub loaded: Vec<String>,
    /// Candidates passed over without error (namespaces, modules without commands).
    pub skipped: Vec<String>,
    /// Candidates omitted because loading or instantiation failed.
    pub failures: Vec<DiscoveryFailure>,
}

impl DiscoveryReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: DiscoveryReport) {
        self.loaded.extend(other.loaded);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "structural".parse::<DiscoveryStrategy>().unwrap(),
            DiscoveryStrategy::Structural
        );
        assert_eq!(
            " Convention ".parse::<DiscoveryStrategy>().unwrap(),
            DiscoveryStrategy::Convention
        );
        assert!("magic".parse::<DiscoveryStrategy>().is_err());
    }

    #[test]
    fn test_manifest_parses_all_export_kinds() {
        let manifest: PluginManifest = serde_json::from_str(
            r#"{
                "description": "mixed",
                "exports": [
                    { "symbol": "Command", "kind": "abstract" },
                    { "symbol": "HelloCommand", "kind": "message", "message": "Hi" },
                    { "symbol": "ExitCommand", "kind": "builtin" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.exports.len(), 3);
        assert!(matches!(manifest.exports[0].kind, ExportDefKind::Abstract));
        match &manifest.exports[1].kind {
            ExportDefKind::Message { message } => assert_eq!(message, "Hi"),
            other => panic!("unexpected kind {:?}", other),
        }
        assert!(matches!(manifest.exports[2].kind, ExportDefKind::Builtin));
    }

    #[test]
    fn test_manifest_rejects_unknown_kind() {
        let result = serde_json::from_str::<PluginManifest>(
            r#"{ "exports": [ { "symbol": "X", "kind": "teleport" } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_module_export_lookup() {
        let module = PluginModule::new(
            "greet",
            vec![Export::abstract_base("Command"), Export::other("helper")],
        );
        assert!(module.export("helper").is_some());
        assert!(!module.export("Command").unwrap().is_concrete_command());
        assert!(module.export("GreetCommand").is_none());
    }

    #[test]
    fn test_report_merge() {
        let mut report = DiscoveryReport {
            loaded: vec!["greet".into()],
            ..Default::default()
        };
        report.merge(DiscoveryReport {
            loaded: vec!["exit".into()],
            skipped: vec!["tools".into()],
            failures: vec![DiscoveryFailure {
                candidate: "broken".into(),
                error: "boom".into(),
            }],
        });

        assert_eq!(report.loaded, vec!["greet", "exit"]);
        assert_eq!(report.skipped, vec!["tools"]);
        assert_eq!(report.failure_count(), 1);
    }
}
