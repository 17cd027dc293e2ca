use std::{
    env, fs,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_NAME: &str = "musicvibe";
const MAIN_CONFIG: &str = "config.toml";
const LIBRARY_INDEX: &str = "library.json";
const PREFERENCES_FILE: &str = "playback-state.json";

/// Well-known locations of MusicVibe's files.
///
/// Configuration and the library index live under the XDG config directory;
/// preferences and logs live in `$HOME/.musicvibe`.
pub struct ConfigPaths;

impl ConfigPaths {
    /// `$XDG_CONFIG_HOME/musicvibe`, falling back to `$HOME/.config/musicvibe`
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
    pub fn config_dir() -> Result<PathBuf, Error> {
        let base = match env::var_os("XDG_CONFIG_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home()?.join(".config"),
        };

        Ok(base.join(APP_NAME))
    }

    /// The configuration directory, created if missing
    ///
    /// # Errors
    /// Returns an error if the directory cannot be located or created
    pub fn ensure_config_dir() -> Result<PathBuf, Error> {
        ensure_dir(Self::config_dir()?)
    }

    /// Main configuration file
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be located
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join(MAIN_CONFIG))
    }

    /// Default JSON library index
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be located
    pub fn library_index() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join(LIBRARY_INDEX))
    }

    /// `$HOME/.musicvibe`, created if missing
    ///
    /// # Errors
    /// Returns an error if `HOME` is not set or the directory cannot be created
    pub fn app_data_dir() -> Result<PathBuf, Error> {
        ensure_dir(home()?.join(format!(".{APP_NAME}")))
    }

    /// Default playback preference file
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be located or created
    pub fn preferences_file() -> Result<PathBuf, Error> {
        Ok(Self::app_data_dir()?.join(PREFERENCES_FILE))
    }

    /// Log directory inside the data directory, created if missing
    ///
    /// # Errors
    /// Returns an error if the directory cannot be located or created
    pub fn log_dir() -> Result<PathBuf, Error> {
        ensure_dir(Self::app_data_dir()?.join("logs"))
    }
}

fn home() -> Result<PathBuf, Error> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, Error> {
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
