//! Version-control metadata for plugins
//!
//! Plugins built from the core plugins directory are stamped with the
//! revision they were last changed in and their repository URL; other
//! plugins only get the URL of the checkout they live in. Lookups shell
//! out to `svn` and never fail the build: anything unexpected yields
//! `None` and the field is left out of the generated page.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Source of revision and URL metadata for a directory
pub trait VersionControl {
    /// Revision the directory was last changed in
    fn revision(&self, dir: &Path) -> Option<String>;

    /// Repository URL of the directory
    fn url(&self, dir: &Path) -> Option<String>;
}

/// Version control that knows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVersionControl;

impl VersionControl for NoVersionControl {
    fn revision(&self, _dir: &Path) -> Option<String> {
        None
    }

    fn url(&self, _dir: &Path) -> Option<String> {
        None
    }
}

/// Subversion command-line client
#[derive(Debug, Clone)]
pub struct Subversion {
    binary: PathBuf,
}

impl Subversion {
    /// Find `svn` on the PATH
    pub fn locate() -> Option<Self> {
        match which::which("svn") {
            Ok(binary) => Some(Self { binary }),
            Err(e) => {
                tracing::debug!(error = %e, "svn not found, skipping version metadata");
                None
            }
        }
    }

    /// Use a specific `svn` binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run<I, S>(&self, args: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = match Command::new(&self.binary).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(binary = %self.binary.display(), error = %e, "failed to run svn");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(status = %output.status, "svn exited with failure");
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for Subversion {
    fn revision(&self, dir: &Path) -> Option<String> {
        let args = [
            OsStr::new("stat"),
            OsStr::new("-v"),
            OsStr::new("--depth"),
            OsStr::new("empty"),
            dir.as_os_str(),
        ];
        self.run(args).and_then(|out| parse_status_revision(&out))
    }

    fn url(&self, dir: &Path) -> Option<String> {
        let args = [OsStr::new("info"), dir.as_os_str()];
        self.run(args).and_then(|out| parse_info_url(&out))
    }
}

/// Extract the last-changed revision from `svn stat -v` output
///
/// The second whitespace-separated field is the revision the path was
/// last changed in.
pub fn parse_status_revision(output: &str) -> Option<String> {
    output.split_whitespace().nth(1).map(str::to_string)
}

/// Extract the repository URL from `svn info` output
pub fn parse_info_url(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("URL:"))
        .map(|url| url.trim().to_string())
}

/// Version metadata known for a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsInfo {
    /// Last-changed revision
    pub revision: Option<String>,
    /// Repository URL
    pub url: Option<String>,
}

/// Collect metadata for every plugin directory under `dir`
///
/// Keys are directory names, which match plugin display names. A missing
/// or unreadable directory yields an empty map.
pub fn scan_core_plugins(dir: &Path, vcs: &dyn VersionControl) -> BTreeMap<String, VcsInfo> {
    let mut plugins = BTreeMap::new();

    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "core plugins directory not found");
        return plugins;
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let info = VcsInfo {
            revision: vcs.revision(entry.path()),
            url: vcs.url(entry.path()),
        };
        tracing::debug!(plugin = %name, revision = ?info.revision, "scanned core plugin");
        plugins.insert(name, info);
    }

    plugins
}
