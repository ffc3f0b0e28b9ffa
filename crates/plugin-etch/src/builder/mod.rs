//! Builder API for documentation generation

mod doc_builder;

pub use doc_builder::{BuildOutput, DocBuilder, DEFAULT_CORE_PLUGINS_DIR, DEFAULT_FRAMEWORK};
