//! Plugin discovery and loading for ReplCalc
//!
//! This module walks a candidate source, loads each candidate, picks the
//! command type it exports and registers one instance per candidate. A
//! candidate that fails to load is logged and left out; it never stops the
//! scan or fails discovery as a whole.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::commands::{builtin_command, Command, CommandRegistry, MessageCommand};
use crate::error::{CalcError, Result};

use super::types::{
    Candidate, CandidateKind, DiscoveryFailure, DiscoveryReport, DiscoveryStrategy, Export,
    ExportDefKind, ExportKind, PluginManifest, PluginModule,
};

/// Suffix appended to the capitalized candidate name under the name convention.
pub const CONVENTION_SUFFIX: &str = "Command";

/// Manifest file that marks a plugin directory as a leaf candidate.
pub const MANIFEST_FILE: &str = "plugin.json";

static PLUGIN_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_\-]{0,63}$").expect("valid plugin name regex"));

static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("valid symbol regex"));

/// A place candidates are enumerated from.
pub trait CandidateSource {
    /// Where the candidates come from, for log messages.
    fn describe(&self) -> String;

    /// Enumerate the immediate candidates, in discovery order.
    fn candidates(&self) -> Result<Vec<Candidate>>;
}

/// Turns candidates into registered commands.
#[derive(Debug, Clone)]
pub struct Discoverer {
    strategy: DiscoveryStrategy,
    suffix: String,
}

impl Discoverer {
    pub fn new(strategy: DiscoveryStrategy) -> Self {
        Self {
            strategy,
            suffix: CONVENTION_SUFFIX.to_string(),
        }
    }

    /// Use a different suffix for the name convention.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn strategy(&self) -> DiscoveryStrategy {
        self.strategy
    }

    /// Symbol the name convention expects for `candidate`, e.g. `greet` → `GreetCommand`.
    pub fn expected_symbol(&self, candidate: &str) -> String {
        let mut chars = candidate.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };
        format!("{}{}", capitalized, self.suffix)
    }

    /// Scan `source` and register one command per loadable candidate.
    pub fn discover(
        &self,
        source: &dyn CandidateSource,
        registry: &mut CommandRegistry,
    ) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        let candidates = match source.candidates() {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    source = %source.describe(),
                    error = %e,
                    "Failed to enumerate plugin candidates"
                );
                return report;
            }
        };

        for candidate in candidates {
            let loader = match &candidate.kind {
                CandidateKind::Namespace => {
                    info!(candidate = %candidate.name, "Skipping plugin namespace");
                    report.skipped.push(candidate.name);
                    continue;
                }
                CandidateKind::Module(loader) => Rc::clone(loader),
            };

            let outcome = loader().and_then(|module| self.instantiate(&candidate.name, &module));
            match outcome {
                Ok(Some(command)) => {
                    let name = candidate.name.to_lowercase();
                    registry.register(&name, command);
                    report.loaded.push(name);
                }
                Ok(None) => {
                    info!(candidate = %candidate.name, "Plugin exports no command, skipping");
                    report.skipped.push(candidate.name);
                }
                Err(e) => {
                    warn!(
                        source = %source.describe(),
                        candidate = %candidate.name,
                        error = %e,
                        "Failed to load plugin, skipping"
                    );
                    report.failures.push(DiscoveryFailure {
                        candidate: candidate.name,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            source = %source.describe(),
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "Plugin discovery finished"
        );

        report
    }

    /// Build the command a loaded module offers.
    ///
    /// `Ok(None)` means the module has nothing to offer under the structural
    /// strategy. A missing conventional symbol is an error.
    fn instantiate(
        &self,
        candidate: &str,
        module: &PluginModule,
    ) -> Result<Option<Rc<dyn Command>>> {
        let export = match self.strategy {
            DiscoveryStrategy::Structural => {
                match module.exports.iter().find(|e| e.is_concrete_command()) {
                    Some(export) => export,
                    None => return Ok(None),
                }
            }
            DiscoveryStrategy::Convention => {
                let symbol = self.expected_symbol(candidate);
                module.export(&symbol).ok_or_else(|| {
                    CalcError::Plugin(format!(
                        "Plugin '{}' does not export '{}'",
                        candidate, symbol
                    ))
                })?
            }
        };

        match &export.kind {
            ExportKind::Command(factory) => factory().map(Some),
            _ => Err(CalcError::Plugin(format!(
                "Symbol '{}' in plugin '{}' is not a concrete command",
                export.symbol, candidate
            ))),
        }
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new(DiscoveryStrategy::default())
    }
}

/// Filesystem plugin directory.
///
/// Each immediate subdirectory is a candidate, visited in name order. A
/// subdirectory with a `plugin.json` is a leaf; one without is a namespace.
/// Plain files are not candidates.
///
/// ```text
/// ~/.replcalc/plugins/
/// ├── hello/
/// │   └── plugin.json
/// ├── quit/
/// │   └── plugin.json
/// └── extras/          (namespace, skipped)
///     └── more/
/// ```
#[derive(Debug, Clone)]
pub struct ManifestDir {
    dir: PathBuf,
}

impl ManifestDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CandidateSource for ManifestDir {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn candidates(&self) -> Result<Vec<Candidate>> {
        if !self.dir.exists() {
            info!(dir = %self.dir.display(), "Plugin directory does not exist, skipping");
            return Ok(Vec::new());
        }

        if !self.dir.is_dir() {
            return Err(CalcError::Config(format!(
                "Plugin path is not a directory: {}",
                self.dir.display()
            )));
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();

        let candidates = dirs
            .into_iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if path.join(MANIFEST_FILE).is_file() {
                    let loader_name = name.clone();
                    Candidate::module(name, move || load_manifest_module(&loader_name, &path))
                } else {
                    Candidate::namespace(name)
                }
            })
            .collect();

        Ok(candidates)
    }
}

/// Load a filesystem plugin directory into a module.
///
/// # Errors
/// - `CalcError::Plugin` if the directory name or a symbol is invalid
/// - `CalcError::Io` if `plugin.json` cannot be read
/// - `CalcError::Json` if the manifest is malformed
/// - `CalcError::NotFound` if a builtin export names an unknown command
pub fn load_manifest_module(name: &str, dir: &Path) -> Result<PluginModule> {
    validate_plugin_name(name)?;

    let content = fs::read_to_string(dir.join(MANIFEST_FILE))?;
    let manifest: PluginManifest = serde_json::from_str(&content)?;

    let mut exports = Vec::with_capacity(manifest.exports.len());
    for def in manifest.exports {
        if !SYMBOL_RE.is_match(&def.symbol) {
            return Err(CalcError::Plugin(format!(
                "Invalid symbol '{}' in plugin '{}'",
                def.symbol, name
            )));
        }

        let export = match def.kind {
            ExportDefKind::Abstract => Export::abstract_base(def.symbol),
            ExportDefKind::Message { message } => {
                let label = def.symbol.clone();
                Export::command(def.symbol, move || {
                    let command: Rc<dyn Command> =
                        Rc::new(MessageCommand::new(label.clone(), message.clone()));
                    Ok(command)
                })
            }
            ExportDefKind::Builtin => {
                // Resolve eagerly so an unknown symbol fails this candidate's load.
                builtin_command(&def.symbol)?;
                let symbol = def.symbol.clone();
                Export::command(def.symbol, move || builtin_command(&symbol))
            }
        };
        exports.push(export);
    }

    Ok(PluginModule::new(name, exports))
}

/// Check a plugin name: a letter, then up to 63 letters, digits, `_` or `-`.
pub fn validate_plugin_name(name: &str) -> Result<()> {
    if PLUGIN_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(CalcError::Plugin(format!(
            "Invalid plugin name '{}': must be 1-64 letters, digits, '_' or '-', starting with a letter",
            name
        )))
    }
}
