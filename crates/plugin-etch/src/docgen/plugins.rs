//! The plugins index
//!
//! One section per plugin listing the interfaces it offers, the framework
//! version it reports and, when it can be found, where its source lives.

use crate::diagnostics::EtchResult;
use crate::plugin::PluginRecord;
use crate::rst;
use crate::vcs::{VcsInfo, VersionControl};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the plugins index
pub const PLUGINS_INDEX: &str = "plugins.rst";

/// Renders `plugins.rst`
pub struct PluginsPage<'a> {
    /// Label printed before the reported version
    framework: &'a str,
    /// Metadata for plugins living in the core plugins directory
    core_plugins: &'a BTreeMap<String, VcsInfo>,
    /// Used for plugins outside the core directory
    vcs: &'a dyn VersionControl,
}

impl<'a> PluginsPage<'a> {
    /// Create a renderer
    pub fn new(
        framework: &'a str,
        core_plugins: &'a BTreeMap<String, VcsInfo>,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            framework,
            core_plugins,
            vcs,
        }
    }

    /// Render the whole page; plugins are sorted by display name
    pub fn render(&self, plugins: &[PluginRecord]) -> String {
        let mut sorted: Vec<&PluginRecord> = plugins.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut text = rst::page_title("Plugins");
        for plugin in sorted {
            tracing::info!(plugin = %plugin.name, "documenting plugin");
            text.push_str(&self.render_plugin(plugin));
        }
        text
    }

    /// Render the section of one plugin
    pub fn render_plugin(&self, plugin: &PluginRecord) -> String {
        let mut text = rst::anchor(&rst::plugin_label(&plugin.name));
        text.push_str(&rst::heading(&plugin.name));
        text.push_str("\nOffers: ");
        for (kind, name) in plugin.info.interface_names() {
            text.push_str(&rst::labeled_reference(
                &format!("{}:{}", kind, name),
                &rst::interface_label(kind, name),
            ));
            text.push(' ');
        }
        text.push_str("\n\n");
        text.push_str(&format!(
            "{} Version: {}\n\n",
            self.framework, plugin.info.version
        ));
        text.push_str(&self.source_block(plugin));
        text.push_str("\n\n");
        text
    }

    fn source_block(&self, plugin: &PluginRecord) -> String {
        if let Some(core) = self.core_plugins.get(&plugin.name) {
            return match (&core.revision, &core.url) {
                (Some(revision), Some(url)) => {
                    format!("Core Plugin: Last updated r{}\n\nURL: {}", revision, url)
                }
                (Some(revision), None) => format!("Core Plugin: Last updated r{}", revision),
                (None, Some(url)) => format!("URL: {}", url),
                (None, None) => String::new(),
            };
        }

        self.vcs
            .url(&plugin.dir.join(".."))
            .map(|url| format!("URL: {}", url))
            .unwrap_or_default()
    }
}

/// Render and write `plugins.rst`
pub fn write_plugins(outdir: &Path, page: &PluginsPage<'_>, plugins: &[PluginRecord]) -> EtchResult<PathBuf> {
    fs::create_dir_all(outdir)?;
    let path = outdir.join(PLUGINS_INDEX);
    fs::write(&path, page.render(plugins))?;
    Ok(path)
}
