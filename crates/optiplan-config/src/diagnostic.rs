// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration and resolution errors rendered as miette diagnostics.
//!
//! Figment extraction errors are converted into `ConfigError` values with
//! source spans and "did you mean?" suggestions based on Jaro-Winkler
//! similarity. The same suggestion logic serves unknown plugin names.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use optiplan_plugin::PluginLookup;
use thiserror::Error;

use crate::model::MALFORMED_ENTRY_PREFIX;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches typos such as `mergePath` -> `mergePaths` or `multipas` -> `multipass`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration or resolution error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(optiplan::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(optiplan::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(optiplan::config::missing_key),
        help("add `{key} = <value>` to the configuration file")
    )]
    MissingKey { key: String },

    /// A default or full-mode entry names a plugin the registry does not know.
    #[error("unknown plugin `{name}`")]
    #[diagnostic(
        code(optiplan::config::unknown_plugin),
        help("{}", format_unknown_plugin_help(suggestion.as_deref()))
    )]
    UnknownPlugin {
        name: String,
        suggestion: Option<String>,
    },

    /// A raw plugin entry has none of the accepted shapes.
    #[error("malformed plugin entry at `{location}`: {detail}")]
    #[diagnostic(
        code(optiplan::config::malformed_entry),
        help("use `\"name\"`, `{{ name = true }}`, `{{ name = false }}` or `{{ name = {{ param = value }} }}`")
    )]
    MalformedEntry { location: String, detail: String },

    /// Two entries of the flattened plan share a name.
    #[error("plugin `{name}` appears more than once in the resolved plan")]
    #[diagnostic(
        code(optiplan::config::duplicate_plugin),
        help("plugin names must be unique; rename the custom plugin or drop the repeated entry")
    )]
    DuplicatePlugin { name: String },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(optiplan::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(optiplan::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

fn format_unknown_plugin_help(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Run `optiplan plugins` to list known plugins"),
        None => "run `optiplan plugins` to list known plugins".to_string(),
    }
}

/// Build an `UnknownPlugin` error with a suggestion drawn from the registry.
pub fn unknown_plugin<L: PluginLookup + ?Sized>(name: &str, lookup: &L) -> ConfigError {
    ConfigError::UnknownPlugin {
        name: name.to_string(),
        suggestion: suggest_key(name, &lookup.names()),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A single figment error may chain several; each becomes its own entry.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let key = error
            .path
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");

        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(&error, field, toml_sources);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key,
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            Kind::Message(message) if message.starts_with(MALFORMED_ENTRY_PREFIX) => {
                ConfigError::MalformedEntry {
                    location: if key.is_empty() { "plugins".to_string() } else { key },
                    detail: message[MALFORMED_ENTRY_PREFIX.len()..].trim().to_string(),
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Find source span for an error in the TOML source files.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    let source = source_path.as_ref().and_then(|path| {
        toml_sources
            .iter()
            .find(|(p, _)| same_file(p, path))
            .map(|(p, content)| (p.as_str(), content.as_str()))
    });

    if let Some((path, content)) = source {
        let section = section_of(&error.path, field);

        if let Some(offset) = find_key_offset(content, &section, field) {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path, content.to_string());
            return (Some(span), Some(named));
        }
    }

    (None, None)
}

/// Section path enclosing `field`; figment's error path ends with the field itself.
fn section_of(path: &[String], field: &str) -> Vec<String> {
    let mut section = path.to_vec();
    if section.last().is_some_and(|last| last == field) {
        section.pop();
    }
    section
}

fn same_file(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["js2svg"]` and `field = "indnt"`, finds the `[js2svg]` header
/// then searches for `indnt` after it. For top-level fields, searches from start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header).map(|pos| pos + header.len())?
        }
    };

    let remaining = &content[search_start..];

    let mut byte_offset = 0;
    for line in remaining.lines() {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            let field_start_in_line = line.len() - trimmed.len();
            return Some(search_start + byte_offset + field_start_in_line);
        }
        byte_offset += line.len() + 1; // +1 for newline
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// no candidate is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
