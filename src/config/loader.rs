use std::fs;
use std::path::{Path, PathBuf};

use super::AuditConfig;
use crate::errors::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".target-audit.toml";

/// How many parent directories are searched for a config file.
const MAX_SEARCH_DEPTH: usize = 10;

/// Parse and validate config from a TOML string.
pub fn parse_and_validate_config(contents: &str) -> Result<AuditConfig> {
    let config = toml::from_str::<AuditConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    config
        .validate()
        .map_err(|errors| Error::Configuration(errors.join("; ")))?;

    Ok(config)
}

/// Generate `start` and its ancestors, up to `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| dir.parent().map(Path::to_path_buf)).take(max_depth)
}

/// Find the nearest config file from `start` upwards.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_SEARCH_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

fn read_config(path: &Path) -> Result<AuditConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents).context(path.display().to_string())?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve the effective configuration.
///
/// An explicit path must exist and parse. Otherwise the nearest discovered
/// file is used; a discovered file that fails to parse is an error too, since
/// silently ignoring it would change audit thresholds without notice. With no
/// file at all the defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<AuditConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let cwd = std::env::current_dir()?;
    match discover_config(&cwd) {
        Some(path) => read_config(&path),
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(AuditConfig::default())
        }
    }
}
