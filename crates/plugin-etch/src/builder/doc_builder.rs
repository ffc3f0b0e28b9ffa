//! DocBuilder - Main API for documentation generation
//!
//! This module provides the builder pattern API for configuring and
//! running a documentation build against a simulation environment.

use crate::diagnostics::{DiagnosticsCollector, EtchError, EtchResult};
use crate::docgen::{collect_interfaces, write_interfaces, write_plugins, InterfaceGroups, PluginsPage};
use crate::environment::{Environment, EnvironmentScope};
use crate::plugin::PluginRecord;
use crate::vcs::{scan_core_plugins, NoVersionControl, Subversion, VersionControl};
use std::path::PathBuf;

/// Directory holding the core plugin sources, relative to the working directory
pub const DEFAULT_CORE_PLUGINS_DIR: &str = "../plugins";

/// Framework name printed in front of plugin versions
pub const DEFAULT_FRAMEWORK: &str = "OpenRAVE";

/// Build output describing the generated documentation
#[derive(Debug)]
pub struct BuildOutput {
    /// Output directory
    pub output_dir: PathBuf,
    /// Every file written, interface pages first, then the indexes
    pub files: Vec<PathBuf>,
    /// Number of plugins documented
    pub plugin_count: usize,
    /// Number of interfaces documented
    pub interface_count: usize,
    /// Number of advertised interfaces that could not be documented
    pub skipped_count: usize,
    /// Problems tolerated during the build
    pub diagnostics: DiagnosticsCollector,
}

impl BuildOutput {
    /// Create an empty build output
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            files: vec![],
            plugin_count: 0,
            interface_count: 0,
            skipped_count: 0,
            diagnostics: DiagnosticsCollector::new(),
        }
    }
}

/// Builder for configuring documentation generation
///
/// # Example
///
/// ```no_run
/// use plugin_etch::{CatalogEnvironment, DocBuilder};
///
/// let env = CatalogEnvironment::load("plugins.toml").expect("catalog");
/// DocBuilder::new("sphinx")
///     .core_plugins_dir("../plugins")
///     .subversion()
///     .build(env)
///     .expect("Failed to generate docs");
/// ```
pub struct DocBuilder {
    /// Output directory
    pub output_dir: PathBuf,
    /// Directory whose sub-directories are core plugins
    pub core_plugins_dir: PathBuf,
    /// Framework name used in version lines
    pub framework: String,
    /// Source of revision and URL metadata
    version_control: Box<dyn VersionControl>,
}

impl DocBuilder {
    /// Create a new builder writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            core_plugins_dir: PathBuf::from(DEFAULT_CORE_PLUGINS_DIR),
            framework: DEFAULT_FRAMEWORK.to_string(),
            version_control: Box::new(NoVersionControl),
        }
    }

    /// Set the core plugins directory
    pub fn core_plugins_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.core_plugins_dir = path.into();
        self
    }

    /// Set the framework name
    pub fn framework(mut self, name: impl Into<String>) -> Self {
        self.framework = name.into();
        self
    }

    /// Use a specific version-control client
    pub fn version_control(mut self, vcs: impl VersionControl + 'static) -> Self {
        self.version_control = Box::new(vcs);
        self
    }

    /// Use `svn` from the PATH when available
    pub fn subversion(self) -> Self {
        match Subversion::locate() {
            Some(svn) => self.version_control(svn),
            None => self,
        }
    }

    /// Generate the documentation
    ///
    /// Takes ownership of the environment and destroys it before
    /// returning, whether the build succeeded or not.
    pub fn build<E: Environment>(&self, env: E) -> EtchResult<BuildOutput> {
        let mut scope = EnvironmentScope::new(env);
        let result = self.generate(&mut *scope);
        scope.close();
        result
    }

    fn generate<E: Environment>(&self, env: &mut E) -> EtchResult<BuildOutput> {
        self.validate()?;

        let mut output = BuildOutput::new(&self.output_dir);

        let plugins: Vec<PluginRecord> = env
            .plugin_info()?
            .into_iter()
            .map(PluginRecord::from_info)
            .collect();
        let advertised: usize = plugins
            .iter()
            .map(|p| p.info.interface_names().count())
            .sum();
        tracing::info!(
            plugins = plugins.len(),
            interfaces = advertised,
            "loaded plugin info"
        );

        let records = collect_interfaces(env, &plugins, &mut output.diagnostics);
        output.interface_count = records.len();
        output.skipped_count = advertised - records.len();

        let groups = InterfaceGroups::new(records);
        output
            .files
            .extend(write_interfaces(&self.output_dir, &groups)?);

        let core_plugins = scan_core_plugins(&self.core_plugins_dir, self.version_control.as_ref());
        let page = PluginsPage::new(&self.framework, &core_plugins, self.version_control.as_ref());
        output
            .files
            .push(write_plugins(&self.output_dir, &page, &plugins)?);
        output.plugin_count = plugins.len();

        output.diagnostics.info(format!(
            "documented {} interfaces from {} plugins ({} skipped)",
            output.interface_count, output.plugin_count, output.skipped_count
        ));

        Ok(output)
    }

    fn validate(&self) -> EtchResult<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(EtchError::config("output directory must not be empty"));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(EtchError::config(format!(
                "output path is not a directory: {}",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}
