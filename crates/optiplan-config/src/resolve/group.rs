// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partitions a plugin list into runs of consecutive same-type plugins.

use optiplan_core::PluginConfig;

/// Split `plugins` into maximal runs sharing a type, keeping order.
///
/// A new run starts exactly where a plugin's type differs from its
/// predecessor's. Inactive plugins stay in the plan.
pub fn group(plugins: Vec<PluginConfig>) -> Vec<Vec<PluginConfig>> {
    let mut groups: Vec<Vec<PluginConfig>> = Vec::new();

    for plugin in plugins {
        if let Some(run) = groups.last_mut()
            && run
                .last()
                .is_some_and(|prev| prev.plugin_type == plugin.plugin_type)
        {
            run.push(plugin);
        } else {
            groups.push(vec![plugin]);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use optiplan_core::{Params, PluginType};

    use super::*;

    fn typed(name: &str, tag: &str) -> PluginConfig {
        PluginConfig::new(name, PluginType::new(tag), true, Params::new())
    }

    fn shape(groups: &[Vec<PluginConfig>]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|run| run.iter().map(|p| p.name.as_str()).collect())
            .collect()
    }

    #[test]
    fn reappearing_type_starts_new_group() {
        let groups = group(vec![
            typed("1", "a"),
            typed("2", "a"),
            typed("3", "b"),
            typed("4", "a"),
        ]);
        assert_eq!(shape(&groups), vec![vec!["1", "2"], vec!["3"], vec!["4"]]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group(Vec::new()).is_empty());
    }

    #[test]
    fn single_plugin_yields_singleton_group() {
        let groups = group(vec![typed("only", "full")]);
        assert_eq!(shape(&groups), vec![vec!["only"]]);
    }

    #[test]
    fn inactive_plugins_are_kept() {
        let mut off = typed("off", "a");
        off.active = false;
        let groups = group(vec![typed("on", "a"), off, typed("next", "a")]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
        assert!(!groups[0][1].active);
    }
}
