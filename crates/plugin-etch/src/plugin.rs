//! Plugin metadata
//!
//! `PluginInfo` is what the environment reports about a loaded library;
//! `PluginRecord` adds the display name and source directory that the
//! generated pages refer to.

use crate::interface_type::InterfaceType;
use std::path::{Path, PathBuf};

/// Conventional prefix of shared library file names
const LIBRARY_PREFIX: &str = "lib";

/// A loaded plugin as reported by the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Path of the plugin library
    pub path: PathBuf,
    /// Framework version the plugin was built against
    pub version: String,
    /// Interface names offered, grouped by type, in advertised order
    pub interfaces: Vec<(InterfaceType, Vec<String>)>,
}

impl PluginInfo {
    /// Create plugin info with no interfaces
    pub fn new(path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            interfaces: Vec::new(),
        }
    }

    /// Add a group of interface names of one type
    pub fn with_interfaces<I, S>(mut self, kind: InterfaceType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces
            .push((kind, names.into_iter().map(Into::into).collect()));
        self
    }

    /// Iterate over every advertised `(type, name)` pair
    pub fn interface_names(&self) -> impl Iterator<Item = (InterfaceType, &str)> {
        self.interfaces
            .iter()
            .flat_map(|(kind, names)| names.iter().map(move |name| (*kind, name.as_str())))
    }
}

/// Plugin info annotated with its display name and source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRecord {
    /// Display name derived from the library file name
    pub name: String,
    /// Directory containing the library
    pub dir: PathBuf,
    /// Original plugin info
    pub info: PluginInfo,
}

impl PluginRecord {
    /// Derive the record for a plugin
    pub fn from_info(info: PluginInfo) -> Self {
        let name = display_name(&info.path);
        let dir = info
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { name, dir, info }
    }
}

/// Derive a plugin display name from its library path
///
/// `/usr/lib/plugins/libgrasper.so` becomes `grasper`.
pub fn display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.strip_prefix(LIBRARY_PREFIX) {
        Some(rest) => rest.to_string(),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_prefix_and_extension() {
        assert_eq!(display_name(Path::new("/opt/plugins/libgrasper.so")), "grasper");
        assert_eq!(display_name(Path::new("libbasemanipulation.dylib")), "basemanipulation");
        assert_eq!(display_name(Path::new("C:/plugins/rplanners.dll")), "rplanners");
    }

    #[test]
    fn test_display_name_without_extension() {
        assert_eq!(display_name(Path::new("plugins/libtextserver")), "textserver");
        assert_eq!(display_name(Path::new("ikfast")), "ikfast");
    }

    #[test]
    fn test_display_name_only_strips_leading_prefix() {
        assert_eq!(display_name(Path::new("/x/mylib.so")), "mylib");
        assert_eq!(display_name(Path::new("/x/liblibfoo.so")), "libfoo");
    }

    #[test]
    fn test_record_keeps_directory() {
        let info = PluginInfo::new("/opt/plugins/libgrasper.so", "0.2.13")
            .with_interfaces(InterfaceType::Planner, ["GraspPlanner"]);
        let record = PluginRecord::from_info(info);

        assert_eq!(record.name, "grasper");
        assert_eq!(record.dir, PathBuf::from("/opt/plugins"));
        assert_eq!(
            record.info.interface_names().collect::<Vec<_>>(),
            vec![(InterfaceType::Planner, "GraspPlanner")]
        );
    }
}
