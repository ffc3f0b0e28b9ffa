//! Error types and diagnostics
//!
//! This module provides error handling and diagnostic reporting
//! for the documentation generator. Errors abort a build; diagnostics
//! record the problems a build tolerates (an interface that could not be
//! created, a help command that failed) and are returned with the output.

use crate::interface_type::InterfaceType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for plugin-etch operations
pub type EtchResult<T> = Result<T, EtchError>;

/// Main error type for plugin-etch
#[derive(Debug, Error)]
pub enum EtchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Plugin catalog could not be loaded
    #[error("Catalog error in {file}: {message}")]
    Catalog { file: PathBuf, message: String },

    /// Environment query failed
    #[error("Environment error: {0}")]
    Environment(String),

    /// Interface could not be instantiated
    #[error("Failed to create {kind} interface {name}: {message}")]
    InterfaceCreation {
        kind: InterfaceType,
        name: String,
        message: String,
    },

    /// Command sent to an interface failed
    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EtchError {
    /// Create a catalog error
    pub fn catalog(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        EtchError::Catalog {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an environment error
    pub fn environment(message: impl Into<String>) -> Self {
        EtchError::Environment(message.into())
    }

    /// Create an interface creation error
    pub fn interface_creation(
        kind: InterfaceType,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        EtchError::InterfaceCreation {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a command error
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        EtchError::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        EtchError::Config(message.into())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Warning - doc generation continues with partial output
    Warning,
    /// Info - informational message
    Info,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// What the diagnostic is about, e.g. `Planner:GraspPlanner`
    pub subject: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            subject: None,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, message)
    }

    /// Set the subject
    pub fn about(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        match self.subject {
            Some(ref subject) => {
                format!("{}: {}: {}", subject, self.severity.display(), self.message)
            }
            None => format!("{}: {}", self.severity.display(), self.message),
        }
    }
}

/// Collector for diagnostics during doc generation
#[derive(Debug, Default, Clone)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, mirroring it to the log
    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Warning => tracing::warn!("{}", diagnostic.format()),
            DiagnosticSeverity::Info => tracing::info!("{}", diagnostic.format()),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning about a subject
    pub fn warning(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.add(Diagnostic::warning(message).about(subject));
    }

    /// Add an info message
    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::info(message));
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_creation_error() {
        let err = EtchError::interface_creation(InterfaceType::Planner, "BiRRT", "not loaded");
        let text = err.to_string();
        assert!(text.contains("Planner"));
        assert!(text.contains("BiRRT"));
        assert!(text.contains("not loaded"));
    }

    #[test]
    fn test_diagnostic_format() {
        let diag = Diagnostic::warning("help failed").about("Sensor:Laser");
        assert_eq!(diag.format(), "Sensor:Laser: warning: help failed");
        assert_eq!(Diagnostic::info("done").format(), "info: done");
    }

    #[test]
    fn test_diagnostics_collector() {
        let mut collector = DiagnosticsCollector::new();
        assert!(collector.is_empty());
        collector.warning("Planner:BiRRT", "failed to create");
        collector.info("scanned 3 plugins");

        assert_eq!(collector.warning_count(), 1);
        assert_eq!(collector.diagnostics().len(), 2);
        assert_eq!(
            collector.diagnostics()[0].subject.as_deref(),
            Some("Planner:BiRRT")
        );
    }
}
