//! Catalog-backed environment
//!
//! Reads a TOML dump of a plugin host: every loaded plugin, the interfaces
//! it offers, and the text each interface answers to `help` and
//! `help commands`. An interface entry without `help` (or `commands`)
//! behaves like an interface whose command handler fails.

use super::{Environment, Interface};
use crate::diagnostics::{EtchError, EtchResult};
use crate::interface_type::InterfaceType;
use crate::plugin::PluginInfo;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const HELP_COMMAND: &str = "help";
const HELP_COMMANDS_COMMAND: &str = "help commands";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "plugin")]
    plugins: Vec<CatalogPlugin>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogPlugin {
    path: PathBuf,
    #[serde(default)]
    version: String,
    #[serde(default, rename = "interface")]
    interfaces: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "type")]
    kind: InterfaceType,
    name: String,
    #[serde(default)]
    description: String,
    help: Option<String>,
    commands: Option<Vec<String>>,
}

/// Environment whose plugins come from a catalog file
#[derive(Debug)]
pub struct CatalogEnvironment {
    source: PathBuf,
    plugins: Vec<CatalogPlugin>,
    destroyed: bool,
}

impl CatalogEnvironment {
    /// Load a catalog from disk
    pub fn load(path: impl AsRef<Path>) -> EtchResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EtchError::catalog(path, format!("cannot read catalog: {}", e)))?;
        Self::parse(&content, path)
    }

    /// Parse catalog text; `source` is only used in error messages
    pub fn parse(content: &str, source: impl Into<PathBuf>) -> EtchResult<Self> {
        let source = source.into();
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| EtchError::catalog(&source, e.to_string()))?;

        tracing::debug!(
            catalog = %source.display(),
            plugins = file.plugins.len(),
            "loaded plugin catalog"
        );

        Ok(Self {
            source,
            plugins: file.plugins,
            destroyed: false,
        })
    }

    /// Path the catalog was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn ensure_alive(&self) -> EtchResult<()> {
        if self.destroyed {
            return Err(EtchError::environment("environment has been destroyed"));
        }
        Ok(())
    }
}

impl Environment for CatalogEnvironment {
    type Interface = CatalogInterface;

    fn plugin_info(&self) -> EtchResult<Vec<PluginInfo>> {
        self.ensure_alive()?;

        let infos = self
            .plugins
            .iter()
            .map(|plugin| {
                let mut info = PluginInfo::new(&plugin.path, &plugin.version);
                for entry in &plugin.interfaces {
                    match info.interfaces.iter_mut().find(|(kind, _)| *kind == entry.kind) {
                        Some((_, names)) => names.push(entry.name.clone()),
                        None => info.interfaces.push((entry.kind, vec![entry.name.clone()])),
                    }
                }
                info
            })
            .collect();

        Ok(infos)
    }

    fn create_interface(&mut self, kind: InterfaceType, name: &str) -> EtchResult<CatalogInterface> {
        self.ensure_alive()?;

        // the last plugin offering a name wins, as in the plugin host
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.interfaces.iter())
            .rfind(|entry| entry.kind == kind && entry.name.eq_ignore_ascii_case(name))
            .map(|entry| CatalogInterface {
                entry: entry.clone(),
            })
            .ok_or_else(|| EtchError::interface_creation(kind, name, "no such interface in catalog"))
    }

    fn destroy(&mut self) {
        self.plugins.clear();
        self.destroyed = true;
    }
}

/// Interface instance answering from a catalog entry
#[derive(Debug)]
pub struct CatalogInterface {
    entry: CatalogEntry,
}

impl Interface for CatalogInterface {
    fn send_command(&mut self, command: &str) -> EtchResult<String> {
        let unsupported = || EtchError::command(command, "command not supported");

        match command.trim() {
            HELP_COMMAND => self.entry.help.clone().ok_or_else(unsupported),
            HELP_COMMANDS_COMMAND => self
                .entry
                .commands
                .as_ref()
                .map(|commands| commands.join(" "))
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }

    fn description(&self) -> String {
        self.entry.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
[[plugin]]
path = "/opt/plugins/libgrasper.so"
version = "0.2.13"

[[plugin.interface]]
type = "planner"
name = "GraspPlanner"
description = "Plans grasps."
help = "Usage: GraspPlanner"
commands = ["Grasp", "SetParams"]

[[plugin.interface]]
type = "problem_instance"
name = "Grasper"

[[plugin.interface]]
type = "planner"
name = "PreGrasp"
help = ""
"#;

    fn load() -> CatalogEnvironment {
        CatalogEnvironment::parse(CATALOG, "catalog.toml").unwrap()
    }

    #[test]
    fn test_plugin_info_groups_by_type() {
        let env = load();
        let infos = env.plugin_info().unwrap();

        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].path, PathBuf::from("/opt/plugins/libgrasper.so"));
        assert_eq!(infos[0].version, "0.2.13");
        assert_eq!(
            infos[0].interfaces,
            vec![
                (
                    InterfaceType::Planner,
                    vec!["GraspPlanner".to_string(), "PreGrasp".to_string()]
                ),
                (InterfaceType::ProblemInstance, vec!["Grasper".to_string()]),
            ]
        );
    }

    #[test]
    fn test_help_commands() {
        let mut env = load();
        let mut iface = env
            .create_interface(InterfaceType::Planner, "graspplanner")
            .unwrap();

        assert_eq!(iface.description(), "Plans grasps.");
        assert_eq!(iface.send_command("help").unwrap(), "Usage: GraspPlanner");
        assert_eq!(iface.send_command("help commands").unwrap(), "Grasp SetParams");
        assert!(iface.send_command("teleport").is_err());
    }

    #[test]
    fn test_missing_help_fails() {
        let mut env = load();
        let mut iface = env
            .create_interface(InterfaceType::ProblemInstance, "Grasper")
            .unwrap();

        assert!(iface.send_command("help").is_err());
        assert!(iface.send_command("help commands").is_err());
        assert_eq!(iface.description(), "");
    }

    #[test]
    fn test_later_plugin_wins_name_clash() {
        let catalog = format!(
            "{}{}",
            CATALOG,
            r#"
[[plugin]]
path = "/opt/plugins/libgrasper2.so"

[[plugin.interface]]
type = "planner"
name = "GraspPlanner"
description = "Newer grasp planner."
help = "Usage: GraspPlanner v2"
"#
        );
        let mut env = CatalogEnvironment::parse(&catalog, "catalog.toml").unwrap();
        let mut iface = env
            .create_interface(InterfaceType::Planner, "GraspPlanner")
            .unwrap();

        assert_eq!(iface.description(), "Newer grasp planner.");
        assert_eq!(iface.send_command("help").unwrap(), "Usage: GraspPlanner v2");
    }

    #[test]
    fn test_create_unknown_interface() {
        let mut env = load();
        let err = env
            .create_interface(InterfaceType::Sensor, "GraspPlanner")
            .unwrap_err();
        assert!(matches!(err, EtchError::InterfaceCreation { .. }));
    }

    #[test]
    fn test_destroyed_environment_refuses_queries() {
        let mut env = load();
        env.destroy();
        assert!(env.plugin_info().is_err());
        assert!(env.create_interface(InterfaceType::Planner, "GraspPlanner").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plugins.toml");
        fs::write(&path, CATALOG).unwrap();

        let env = CatalogEnvironment::load(&path).unwrap();
        assert_eq!(env.source(), path.as_path());
        assert_eq!(env.plugin_info().unwrap().len(), 1);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(matches!(
            CatalogEnvironment::load(&missing),
            Err(EtchError::Catalog { .. })
        ));

        let bad = "[[plugin]]\npath = \"/x/liba.so\"\n[[plugin.interface]]\ntype = \"teleporter\"\nname = \"x\"\n";
        let err = CatalogEnvironment::parse(bad, "bad.toml").unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
