use std::{fs, path::Path};

use crate::{MusicVibeError, Result};

const HEADER: &str = "\
# MusicVibe configuration
#
# Every setting is optional. Run `musicvibe config show` for the effective
# values and `musicvibe config schema` for the full list.
";

/// Writes a commented, otherwise empty configuration file at `path`.
pub fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MusicVibeError::file_access(parent, e))?;
    }

    fs::write(path, HEADER).map_err(|e| MusicVibeError::file_access(path, e))
}
