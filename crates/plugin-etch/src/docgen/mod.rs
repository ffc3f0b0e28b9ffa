//! Documentation generation core
//!
//! Interface collection and the two rst outputs: one page per interface
//! plus `interfaces.rst`, and `plugins.rst`.

pub mod interfaces;
pub mod plugins;

pub use interfaces::{
    collect_interfaces, render_interface_page, render_interfaces_index, write_interfaces,
    InterfaceGroups, InterfaceRecord, INTERFACES_DIR, INTERFACES_INDEX,
};
pub use plugins::{write_plugins, PluginsPage, PLUGINS_INDEX};
