// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `optiplan plugins` command implementation.
//!
//! Without `--template` files the built-in catalog is listed in pipeline
//! order; otherwise the extended registry is listed by name.

use std::io::IsTerminal;
use std::path::PathBuf;

use colored::Colorize;
use optiplan_config::ConfigError;
use optiplan_plugin::{PluginTemplate, search_catalog};

use crate::resolve::build_registry;

/// Print plugins matching `query`.
pub fn run_plugins(query: &str, templates: &[PathBuf], plain: bool) -> Result<(), Vec<ConfigError>> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let listing = if templates.is_empty() {
        let matches = search_catalog(query);
        (!matches.is_empty()).then(|| format_catalog(&matches, use_color))
    } else {
        let registry = build_registry(templates)?;
        let matches = registry.search(query);
        (!matches.is_empty()).then(|| format_catalog(matches, use_color))
    };

    match listing {
        Some(listing) => print!("{listing}"),
        None => eprintln!("no plugins match `{query}`"),
    }
    Ok(())
}

/// One line per template: status, name, type and description.
pub fn format_catalog<'a>(
    templates: impl IntoIterator<Item = &'a PluginTemplate>,
    use_color: bool,
) -> String {
    let mut out = String::new();
    for template in templates {
        let status = if template.active { "on " } else { "off" };
        let status = match (template.active, use_color) {
            (true, true) => status.green().to_string(),
            (false, true) => status.dimmed().to_string(),
            _ => status.to_string(),
        };
        out.push_str(&format!(
            "  {status} {:<32} {:<15} {}\n",
            template.name,
            template.plugin_type.as_str(),
            template.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_builtin() {
        let listing = format_catalog(&search_catalog(""), false);
        assert_eq!(listing.lines().count(), 38);
        assert!(listing.lines().next().unwrap().contains("removeDoctype"));
    }

    #[test]
    fn inactive_entries_show_off() {
        let listing = format_catalog(&search_catalog("sortAttrs"), false);
        let line = listing.lines().find(|l| l.contains("sortAttrs")).unwrap();
        assert!(line.trim_start().starts_with("off"));
        assert!(line.contains("perItem"));
    }

    #[test]
    fn registered_templates_are_listed_by_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[plugin]\nname = \"inlineFonts\"\ntype = \"full\"\ndescription = \"inlines web fonts\"\n",
        )
        .unwrap();

        let registry = build_registry(&[file.path().to_path_buf()]).unwrap();
        let listing = format_catalog(registry.search(""), false);
        assert_eq!(listing.lines().count(), 39);
        assert!(listing.lines().next().unwrap().contains("addClassesToSVGElement"));
        assert!(format_catalog(registry.search("web fonts"), false).contains("inlineFonts"));
    }
}
