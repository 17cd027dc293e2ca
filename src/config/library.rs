use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigPaths;

/// Track library configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LibraryConfig {
    /// Path to the JSON library index. Defaults to `library.json` in the
    /// configuration directory.
    pub index: Option<PathBuf>,
}

impl LibraryConfig {
    /// The configured index path, or the default one
    ///
    /// # Errors
    /// Returns an error if no path is configured and the configuration
    /// directory cannot be determined
    pub fn index_path(&self) -> Result<PathBuf, std::io::Error> {
        match &self.index {
            Some(path) => Ok(path.clone()),
            None => ConfigPaths::library_index(),
        }
    }
}
