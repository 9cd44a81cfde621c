// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `optiplan resolve` command implementation.
//!
//! Loads the user configuration, applies command-line overrides, resolves
//! the plan and prints it as a grouped table or as JSON.

use std::io::IsTerminal;
use std::path::PathBuf;

use colored::Colorize;
use optiplan_config::diagnostic::figment_to_config_errors;
use optiplan_config::{
    ConfigError, DefaultsSource, EmbeddedDefaults, FileDefaults, ResolvedConfiguration, Resolver,
    UserConfig,
};
use optiplan_core::PluginConfig;
use optiplan_plugin::PluginRegistry;

use crate::ResolveArgs;

/// Run the `optiplan resolve` command.
pub fn run_resolve(args: &ResolveArgs, plain: bool) -> Result<(), Vec<ConfigError>> {
    let registry = build_registry(&args.templates)?;
    let user = load_user(args)?;

    let plan = match &args.defaults {
        Some(path) => resolve_with(registry, FileDefaults::new(path), &user)?,
        None => resolve_with(registry, EmbeddedDefaults, &user)?,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| vec![ConfigError::Other(format!("failed to serialize plan: {e}"))])?;
        println!("{json}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print!("{}", format_plan(&plan, use_color));
    }
    Ok(())
}

/// Built-in catalog plus every `--template` file.
pub fn build_registry(templates: &[PathBuf]) -> Result<PluginRegistry, Vec<ConfigError>> {
    let mut registry = PluginRegistry::with_builtins();
    for path in templates {
        registry
            .register_file(path)
            .map_err(|e| vec![ConfigError::Other(e.to_string())])?;
    }
    Ok(registry)
}

/// Load user configuration and fold in the command-line overrides.
fn load_user(args: &ResolveArgs) -> Result<UserConfig, Vec<ConfigError>> {
    let loaded = match &args.config {
        Some(path) => optiplan_config::load_user_config_from_path(path).map_err(|e| {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            figment_to_config_errors(e, &sources)
        }),
        None => optiplan_config::load_user_config().map_err(|e| {
            figment_to_config_errors(e, &optiplan_config::collect_toml_sources())
        }),
    };
    let mut user = loaded?;

    if args.full {
        user.full = true;
    }
    if args.multipass {
        user.multipass = Some(true);
    }
    if let Some(precision) = args.precision {
        user.float_precision = Some(precision);
    }
    Ok(user)
}

fn resolve_with<D: DefaultsSource>(
    registry: PluginRegistry,
    defaults: D,
    user: &UserConfig,
) -> Result<ResolvedConfiguration, Vec<ConfigError>> {
    Resolver::new(registry, defaults).resolve(user)
}

/// Render the plan as an indented table, one block per group.
pub fn format_plan(plan: &ResolvedConfiguration, use_color: bool) -> String {
    let mut out = String::new();
    let active = plan.active_plugins().count();
    let total = plan.iter_plugins().count();

    out.push('\n');
    out.push_str(&format!(
        "  optiplan plan: {total} plugins ({active} active) in {} groups, multipass {}\n",
        plan.group_count(),
        if plan.multipass { "on" } else { "off" }
    ));
    out.push_str(&format!("  {}\n", "-".repeat(50)));

    for (i, run) in plan.plugins.iter().enumerate() {
        let header = format!("[{}] {}", i + 1, run[0].plugin_type);
        if use_color {
            out.push_str(&format!("  {}\n", header.bold()));
        } else {
            out.push_str(&format!("  {header}\n"));
        }
        for plugin in run {
            out.push_str(&format!("      {}\n", format_plugin(plugin, use_color)));
        }
    }

    out
}

fn format_plugin(plugin: &PluginConfig, use_color: bool) -> String {
    let symbol = match (plugin.active, use_color) {
        (true, true) => "✓".green().to_string(),
        (false, true) => "-".dimmed().to_string(),
        (true, false) => "✓".to_string(),
        (false, false) => "-".to_string(),
    };

    let mut line = format!("{symbol} {:<28}", plugin.name);
    if plugin.is_custom() {
        line.push_str(" (custom)");
    }
    if !plugin.params.is_empty() {
        let params = plugin
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        if use_color {
            line.push_str(&format!(" {}", params.dimmed()));
        } else {
            line.push(' ');
            line.push_str(&params);
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(toml: &str) -> ResolvedConfiguration {
        optiplan_config::load_and_resolve_str(toml).expect("config should resolve")
    }

    #[test]
    fn plain_table_lists_every_group() {
        let plan = plan("");
        let table = format_plan(&plan, false);

        assert!(table.contains("38 plugins"));
        assert!(table.contains(&format!("in {} groups", plan.group_count())));
        assert!(table.contains("[1] perItem"));
        assert!(table.contains("multipass off"));
        assert!(table.lines().any(|l| l.contains("convertPathData") && l.contains("floatPrecision=3")));
    }

    #[test]
    fn inactive_plugins_are_marked() {
        let table = format_plan(&plan("plugins = [{ removeTitle = false }]"), false);
        let line = table
            .lines()
            .find(|l| l.contains("removeTitle"))
            .expect("removeTitle should be listed");
        assert!(line.trim_start().starts_with('-'));
    }

    #[test]
    fn command_line_overrides_apply_to_loaded_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"multipass = false\nfloat_precision = 2\n").unwrap();

        let args = ResolveArgs {
            config: Some(file.path().to_path_buf()),
            multipass: true,
            precision: Some(5),
            ..ResolveArgs::default()
        };
        let user = load_user(&args).unwrap();
        assert_eq!(user.multipass, Some(true));
        assert_eq!(user.float_precision, Some(5));
        assert!(!user.full);
    }

    #[test]
    fn unknown_key_in_config_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"multipas = true\n").unwrap();

        let args = ResolveArgs {
            config: Some(file.path().to_path_buf()),
            ..ResolveArgs::default()
        };
        let errors = load_user(&args).unwrap_err();
        match &errors[..] {
            [ConfigError::UnknownKey { key, span, src, .. }] => {
                assert_eq!(key, "multipas");
                assert!(span.is_some());
                assert!(src.is_some());
            }
            other => panic!("unexpected errors: {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let args = ResolveArgs {
            config: Some(dir.path().join("typo.toml")),
            ..ResolveArgs::default()
        };
        assert!(!load_user(&args).unwrap_err().is_empty());
    }

    #[test]
    fn template_files_extend_the_registry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[plugin]\nname = \"inlineFonts\"\ntype = \"full\"\n",
        )
        .unwrap();

        let registry = build_registry(&[file.path().to_path_buf()]).unwrap();
        assert!(registry.get("inlineFonts").is_some());
        assert_eq!(registry.len(), 39);
    }

    #[test]
    fn broken_template_file_fails() {
        assert!(build_registry(&["/nonexistent/plugin.toml".into()]).is_err());
    }
}
