//! reStructuredText building blocks
//!
//! The generated pages use a small, fixed subset of rst: explicit targets,
//! dash-underlined section titles, `:ref:` roles and a toctree. Keeping the
//! exact strings in one place keeps the output byte-stable.

use crate::interface_type::InterfaceType;

/// Explicit hyperlink target, followed by a blank line
pub fn anchor(label: &str) -> String {
    format!(".. _{}:\n\n", label)
}

/// Section title underlined with dashes
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.chars().count()))
}

/// Section title with dashes above and below, used for page titles
pub fn page_title(title: &str) -> String {
    let rule = "-".repeat(title.chars().count());
    format!("\n{}\n{}\n{}\n", rule, title, rule)
}

/// `:ref:` role pointing at a label
pub fn reference(label: &str) -> String {
    format!(":ref:`{}`", label)
}

/// `:ref:` role with explicit link text
pub fn labeled_reference(text: &str, label: &str) -> String {
    format!(":ref:`{} <{}>`", text, label)
}

/// Opening of a one-level toctree; entries follow indented by two spaces
pub fn toctree() -> &'static str {
    ".. toctree::\n  :maxdepth: 1\n  \n"
}

/// Label of an interface page, e.g. `Planner-graspplanner`
pub fn interface_label(kind: InterfaceType, name: &str) -> String {
    format!("{}-{}", kind, name.to_lowercase())
}

/// Label of an interface type section, e.g. `interface-Planner`
pub fn type_label(kind: InterfaceType) -> String {
    format!("interface-{}", kind)
}

/// Label of a plugin section, e.g. `plugin-grasper`
pub fn plugin_label(plugin: &str) -> String {
    format!("plugin-{}", plugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_anchor_and_heading() {
        assert_eq!(anchor("plugin-grasper"), ".. _plugin-grasper:\n\n");
        assert_eq!(heading("grasper"), "grasper\n-------\n");
        assert_eq!(page_title("Plugins"), "\n-------\nPlugins\n-------\n");
    }

    #[test]
    fn test_heading_counts_characters() {
        assert_eq!(heading("Größe"), "Größe\n-----\n");
    }

    #[test]
    fn test_references() {
        assert_eq!(reference("interface-Planner"), ":ref:`interface-Planner`");
        assert_eq!(
            labeled_reference("Planner:BiRRT", "Planner-birrt"),
            ":ref:`Planner:BiRRT <Planner-birrt>`"
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            interface_label(InterfaceType::Planner, "GraspPlanner"),
            "Planner-graspplanner"
        );
        assert_eq!(type_label(InterfaceType::Sensor), "interface-Sensor");
        assert_eq!(plugin_label("grasper"), "plugin-grasper");
    }
}
