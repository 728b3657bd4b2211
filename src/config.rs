//! User configuration handling

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Columns of indentation per nesting level
    pub indent_width: Option<usize>,
    /// Rows shown at once when the host does not report a size
    pub viewport_height: Option<usize>,
    /// `tracing` filter directive, e.g. `thread_fold=debug`
    pub log_filter: Option<String>,
}

/// Load UI configuration from the user's config directory.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_ui_config() -> anyhow::Result<Option<UiConfig>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    load_ui_config_from(&path)
}

/// Load UI configuration from an explicit path. A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_ui_config_from(path: &Path) -> anyhow::Result<Option<UiConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(Some(config))
}

fn config_path() -> Option<PathBuf> {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else if let Ok(home) = std::env::var("HOME") {
        Path::new(&home).join(".config")
    } else {
        return None;
    };

    Some(base.join("thread-fold").join("config.json"))
}
