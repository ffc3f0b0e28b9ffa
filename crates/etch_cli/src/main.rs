//! `build-interfaces` - writes reStructuredText pages for every interface
//! offered by the plugins of a simulation environment.

use anyhow::{Context, Result};
use clap::Parser;
use plugin_etch::builder::{DEFAULT_CORE_PLUGINS_DIR, DEFAULT_FRAMEWORK};
use plugin_etch::{CatalogEnvironment, DocBuilder};
use std::path::PathBuf;

/// Builds rst files of the interfaces provided by the loaded plugins
#[derive(Debug, Parser)]
#[command(name = "build-interfaces", version)]
struct Args {
    /// Output directory to write all interface rst files to; the root file is interfaces.rst
    #[arg(short = 'o', long = "outdir", default_value = "sphinx")]
    outdir: PathBuf,

    /// Plugin catalog describing the loaded plugins and their interfaces
    #[arg(short = 'c', long, default_value = "plugins.toml")]
    catalog: PathBuf,

    /// Directory whose sub-directories hold the core plugin sources
    #[arg(long, default_value = DEFAULT_CORE_PLUGINS_DIR)]
    core_plugins_dir: PathBuf,

    /// Framework name printed in front of plugin versions
    #[arg(long, default_value = DEFAULT_FRAMEWORK)]
    framework: String,

    /// Skip version-control lookups
    #[arg(long)]
    no_vcs: bool,
}

fn main() -> Result<()> {
    // Use ETCH_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("ETCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let env = CatalogEnvironment::load(&args.catalog)
        .with_context(|| format!("Failed to open environment from {}", args.catalog.display()))?;

    let mut builder = DocBuilder::new(&args.outdir)
        .core_plugins_dir(&args.core_plugins_dir)
        .framework(&args.framework);
    if !args.no_vcs {
        builder = builder.subversion();
    }

    let output = builder.build(env).context("Documentation build failed")?;

    println!(
        "  ✓ {} interfaces from {} plugins -> {} ({} skipped)",
        output.interface_count,
        output.plugin_count,
        output.output_dir.display(),
        output.skipped_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["build-interfaces"]).unwrap();
        assert_eq!(args.outdir, PathBuf::from("sphinx"));
        assert_eq!(args.catalog, PathBuf::from("plugins.toml"));
        assert_eq!(args.core_plugins_dir, PathBuf::from("../plugins"));
        assert_eq!(args.framework, "OpenRAVE");
        assert!(!args.no_vcs);
    }

    #[test]
    fn test_outdir_flags() {
        let short = Args::try_parse_from(["build-interfaces", "-o", "out"]).unwrap();
        let long = Args::try_parse_from(["build-interfaces", "--outdir", "out"]).unwrap();
        assert_eq!(short.outdir, PathBuf::from("out"));
        assert_eq!(long.outdir, PathBuf::from("out"));
        assert!(Args::try_parse_from(["build-interfaces", "--bogus"]).is_err());
    }

    #[test]
    fn test_run_with_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = temp_dir.path().join("plugins.toml");
        fs::write(
            &catalog,
            r#"
[[plugin]]
path = "/opt/plugins/libgrasper.so"
version = "0.2.13"

[[plugin.interface]]
type = "planner"
name = "GraspPlanner"
description = "Plans grasps."
help = "Usage: GraspPlanner"
"#,
        )
        .unwrap();
        let outdir = temp_dir.path().join("sphinx");

        let args = Args::try_parse_from([
            OsStr::new("build-interfaces"),
            OsStr::new("-o"),
            outdir.as_os_str(),
            OsStr::new("--catalog"),
            catalog.as_os_str(),
            OsStr::new("--core-plugins-dir"),
            temp_dir.path().join("missing").as_os_str(),
            OsStr::new("--no-vcs"),
        ])
        .unwrap();
        run(&args).unwrap();

        let page = fs::read_to_string(outdir.join("interfaces/Planner/graspplanner.rst")).unwrap();
        assert!(page.contains("GraspPlanner - grasper"));
        assert!(page.ends_with("Plans grasps.\n\nUsage: GraspPlanner"));
    }

    #[test]
    fn test_run_missing_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            OsStr::new("build-interfaces"),
            OsStr::new("--catalog"),
            temp_dir.path().join("nope.toml").as_os_str(),
            OsStr::new("--no-vcs"),
        ])
        .unwrap();

        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to open environment"));
    }
}
