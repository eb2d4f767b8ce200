// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics for `tether.toml` problems.
//!
//! Figment reports deserialization failures without any notion of where in
//! the file they came from. This module maps each failure to a
//! [`ConfigError`], pointing unknown keys back at the offending line and
//! proposing the closest valid key when the typo is near enough.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must exceed before it is offered.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading or validating the configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The key is not part of the section's schema.
    #[error("`{key}` is not a recognized setting")]
    #[diagnostic(
        code(tether::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys the section accepts, comma separated.
        valid_keys: String,
        #[label("unrecognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type ({detail})")]
    #[diagnostic(code(tether::config::invalid_type), help("use a value of type {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("required setting `{key}` is absent")]
    #[diagnostic(
        code(tether::config::missing_key),
        help("set `{key}` in tether.toml or via TETHER_* environment variables")
    )]
    MissingKey { key: String },

    /// Deserialized fine but violates a cross-field or range rule.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(tether::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(tether::config::other))]
    Other(String),
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    fn from_figment(error: &figment::error::Error, sources: &SourceSet<'_>) -> Self {
        match &error.kind {
            Kind::UnknownField(field, expected) => {
                let suggestion = suggest_key(field, expected);
                let (span, src) = sources
                    .locate(error, field)
                    .map_or((None, None), |(span, src)| (Some(span), Some(src)));
                Self::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => {
                let mut key = error.path.clone();
                key.push(field.to_string());
                Self::MissingKey { key: key.join(".") }
            }
            Kind::InvalidType(actual, expected) => Self::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}"),
                expected: expected.clone(),
            },
            _ => Self::Other(error.to_string()),
        }
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let listing = format!("this section accepts: {valid_keys}");
    match suggestion {
        Some(close) => format!("did you mean `{close}`? {listing}"),
        None => listing,
    }
}

/// TOML documents that went into a figment, keyed by display path.
struct SourceSet<'a> {
    docs: &'a [(String, String)],
}

impl SourceSet<'_> {
    /// The document an error originated from. Inline strings carry no file
    /// path, so a lone document is assumed to be the origin.
    fn origin(&self, error: &figment::error::Error) -> Option<&(String, String)> {
        let file = error.metadata.as_ref().and_then(|meta| match meta.source.as_ref()? {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });
        match file {
            Some(path) => self.docs.iter().find(|(name, _)| *name == path),
            None if self.docs.len() == 1 => self.docs.first(),
            None => None,
        }
    }

    fn locate(
        &self,
        error: &figment::error::Error,
        field: &str,
    ) -> Option<(SourceSpan, NamedSource<String>)> {
        let (name, text) = self.origin(error)?;
        let offset = find_key_offset(text, &error.path, field)?;
        Some((
            SourceSpan::new(offset.into(), field.len()),
            NamedSource::new(name, text.clone()),
        ))
    }
}

/// Map a figment failure into one diagnostic per underlying error.
///
/// `toml_sources` holds `(display_path, contents)` for every TOML document
/// merged into the figment so unknown keys can be underlined in place.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    let sources = SourceSet { docs: toml_sources };
    err.into_iter()
        .map(|error| ConfigError::from_figment(&error, &sources))
        .collect()
}

/// Byte offset of `field` within the table named by `path`.
///
/// Numeric path segments (array indices) are ignored, so `["reminders",
/// "tiers", "0"]` matches the first key under a `[[reminders.tiers]]`
/// header. An empty path only matches keys above the first header.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted: Vec<&str> = path
        .iter()
        .map(String::as_str)
        .filter(|segment| segment.parse::<usize>().is_err())
        .collect();
    let wanted = wanted.join(".");

    let mut in_table = wanted.is_empty();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let body = line.trim();
        if body.starts_with('[') {
            let header = body.trim_start_matches('[').trim_end_matches(']').trim();
            in_table = header == wanted;
        } else if in_table {
            let indent = line.len() - line.trim_start().len();
            let rest = line.trim_start().strip_prefix(field);
            if rest.is_some_and(|rest| rest.trim_start().starts_with('=')) {
                return Some(offset + indent);
            }
        }
        offset += line.len();
    }
    None
}

/// The valid key closest to `unknown`, if it is similar enough to offer.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_owned())
}

/// Print every diagnostic to stderr with miette's graphical renderer.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => out.push_str(&rendered),
            Err(_) => out.push_str(&format!("error: {error}\n")),
        }
    }
    eprint!("{out}");
}
