// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Tether delivery core.
//!
//! Settings come from `tether.toml` (working directory, then the user config
//! directory, then `/etc/tether`) overlaid by `TETHER_*` environment
//! variables. Unknown keys are rejected, and every failure is reported as a
//! [`ConfigError`] diagnostic that can be rendered with [`render_errors`].
//!
//! ```no_run
//! let config = tether_config::load_and_validate().expect("config errors");
//! assert!(config.queue.max_attempts > 0);
//! ```

use std::path::{Path, PathBuf};

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TetherConfig;

/// Load from the standard file hierarchy and validate.
pub fn load_and_validate() -> Result<TetherConfig, Vec<ConfigError>> {
    checked(loader::load_config(), hierarchy_sources)
}

/// Load from an explicit file (plus env overrides) and validate.
pub fn load_and_validate_path(path: &Path) -> Result<TetherConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_path(path), || {
        read_sources([path.to_path_buf()])
    })
}

/// Load from an in-memory TOML document and validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<TetherConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a successful load, or turn a figment failure into diagnostics.
/// Sources are only read back when there is an error to point into.
fn checked(
    loaded: Result<TetherConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TetherConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn hierarchy_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|dir| dir.join(loader::CONFIG_FILE_NAME))
        .unwrap_or_else(|_| PathBuf::from(loader::CONFIG_FILE_NAME));
    let candidates = std::iter::once(local)
        .chain(loader::user_config_path())
        .chain(std::iter::once(PathBuf::from(loader::SYSTEM_CONFIG_PATH)));
    read_sources(candidates)
}

fn read_sources(paths: impl IntoIterator<Item = PathBuf>) -> Vec<(String, String)> {
    paths
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
