//! Interface pages and the interfaces index
//!
//! Every interface a plugin advertises is instantiated once, asked for its
//! help text, and released again. The resulting records are grouped by
//! type and written to `interfaces/<type>/<name>.rst`, with
//! `interfaces.rst` linking them all.

use crate::diagnostics::{DiagnosticsCollector, EtchResult};
use crate::environment::{Environment, Interface};
use crate::interface_type::InterfaceType;
use crate::plugin::PluginRecord;
use crate::rst;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory (under the output directory) holding the interface pages
pub const INTERFACES_DIR: &str = "interfaces";

/// File name of the interfaces index
pub const INTERFACES_INDEX: &str = "interfaces.rst";

/// A documented interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Interface name as advertised by the plugin
    pub name: String,
    /// Interface type
    pub kind: InterfaceType,
    /// Display name of the owning plugin
    pub plugin: String,
    /// Sub-commands reported by `help commands`
    pub commands: Vec<String>,
    /// Rendered page content
    pub text: String,
}

impl InterfaceRecord {
    /// Build a record and render its page
    pub fn new(
        kind: InterfaceType,
        name: impl Into<String>,
        plugin: impl Into<String>,
        description: &str,
        help: &str,
        commands: Vec<String>,
    ) -> Self {
        let name = name.into();
        let plugin = plugin.into();
        let text = render_interface_page(kind, &name, &plugin, description, help);
        Self {
            name,
            kind,
            plugin,
            commands,
            text,
        }
    }

    /// Lowercased name used for the file and toctree entry
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }

    /// Toctree entry relative to the output directory
    pub fn toctree_entry(&self) -> String {
        format!("{}/{}/{}", INTERFACES_DIR, self.kind, self.file_stem())
    }
}

/// Render the page of one interface
pub fn render_interface_page(
    kind: InterfaceType,
    name: &str,
    plugin: &str,
    description: &str,
    help: &str,
) -> String {
    let mut text = rst::anchor(&rst::interface_label(kind, name));
    text.push_str(&rst::heading(&format!("{} - {}", name, plugin)));
    text.push('\n');
    text.push_str(&format!(":Type: {}\n\n", rst::reference(&rst::type_label(kind))));
    text.push_str(&format!(":Plugin: {}\n\n", rst::reference(&rst::plugin_label(plugin))));
    text.push_str(description);
    text.push_str("\n\n");
    text.push_str(help);
    text
}

/// Instantiate every advertised interface and record its documentation
///
/// Interfaces that cannot be created are skipped. A failing `help` or
/// `help commands` query leaves that part empty. Each instance is
/// released before the next one is created.
pub fn collect_interfaces<E: Environment>(
    env: &mut E,
    plugins: &[PluginRecord],
    diagnostics: &mut DiagnosticsCollector,
) -> Vec<InterfaceRecord> {
    let mut records = Vec::new();

    for plugin in plugins {
        for (kind, name) in plugin.info.interface_names() {
            tracing::info!(plugin = %plugin.name, kind = %kind, "{}", name);
            let subject = format!("{}:{}", kind, name);

            let mut interface = match env.create_interface(kind, name) {
                Ok(interface) => interface,
                Err(e) => {
                    diagnostics.warning(subject, format!("failed to create interface: {}", e));
                    continue;
                }
            };

            let help = interface.send_command("help").unwrap_or_else(|e| {
                diagnostics.warning(subject.as_str(), format!("help unavailable: {}", e));
                String::new()
            });
            let commands = match interface.send_command("help commands") {
                Ok(text) => text.split_whitespace().map(str::to_string).collect(),
                Err(e) => {
                    diagnostics.warning(subject.as_str(), format!("command list unavailable: {}", e));
                    Vec::new()
                }
            };
            let description = interface.description();
            drop(interface);

            tracing::debug!(interface = %subject, commands = commands.len(), "collected help");
            records.push(InterfaceRecord::new(
                kind,
                name,
                plugin.name.as_str(),
                &description,
                &help,
                commands,
            ));
        }
    }

    records
}

/// Interface records grouped by type
///
/// Every type is present, in sorted order; records within a type are
/// sorted by lowercased name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceGroups {
    groups: BTreeMap<InterfaceType, Vec<InterfaceRecord>>,
}

impl InterfaceGroups {
    /// Group and sort records
    pub fn new(records: Vec<InterfaceRecord>) -> Self {
        let mut groups: BTreeMap<InterfaceType, Vec<InterfaceRecord>> = InterfaceType::ALL
            .into_iter()
            .map(|kind| (kind, Vec::new()))
            .collect();

        for record in records {
            groups.entry(record.kind).or_default().push(record);
        }
        for descs in groups.values_mut() {
            descs.sort_by_key(|record| record.name.to_lowercase());
        }

        Self { groups }
    }

    /// Iterate over types and their records in output order
    pub fn iter(&self) -> impl Iterator<Item = (InterfaceType, &[InterfaceRecord])> {
        self.groups
            .iter()
            .map(|(kind, records)| (*kind, records.as_slice()))
    }

    /// Records of one type
    pub fn get(&self, kind: InterfaceType) -> &[InterfaceRecord] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of records
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Render `interfaces.rst`
pub fn render_interfaces_index(groups: &InterfaceGroups) -> String {
    let mut text = rst::page_title("Interfaces");

    for (kind, records) in groups.iter() {
        text.push_str(&rst::anchor(&rst::type_label(kind)));
        text.push_str(&rst::heading(kind.as_str()));
        text.push_str(rst::toctree());
        for record in records {
            text.push_str("  ");
            text.push_str(&record.toctree_entry());
            text.push('\n');
        }
        text.push_str("\n\n");
    }

    text.push('\n');
    text
}

/// Write every interface page and the interfaces index
///
/// A directory is created for every type, even one without interfaces.
pub fn write_interfaces(outdir: &Path, groups: &InterfaceGroups) -> EtchResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (kind, records) in groups.iter() {
        let type_dir = outdir.join(INTERFACES_DIR).join(kind.as_str());
        fs::create_dir_all(&type_dir)?;

        for record in records {
            let path = type_dir.join(format!("{}.rst", record.file_stem()));
            fs::write(&path, &record.text)?;
            written.push(path);
        }
    }

    fs::create_dir_all(outdir)?;
    let index = outdir.join(INTERFACES_INDEX);
    fs::write(&index, render_interfaces_index(groups))?;
    written.push(index);

    Ok(written)
}
