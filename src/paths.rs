//! XDG-compliant path resolution for starhash.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Global XDG-compliant directories for starhash.
#[derive(Debug, Clone)]
pub struct StarhashPaths {
    /// `$XDG_CONFIG_HOME/starhash/`
    pub config_dir: PathBuf,
}

impl StarhashPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> Result<Self, ConfigError> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("starhash");

        Ok(Self { config_dir })
    }

    /// Path to the global config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_xdg_layout() {
        // Read-only check: mutating env vars is unsafe in edition 2024.
        if std::env::var("HOME").is_err() {
            return;
        }
        let paths = StarhashPaths::resolve().unwrap();
        assert!(paths.config_dir.ends_with("starhash"));
        assert!(paths.config_file().starts_with(&paths.config_dir));
    }

    #[test]
    fn config_file_derives_from_dir() {
        let paths = StarhashPaths {
            config_dir: PathBuf::from("/cfg/starhash"),
        };
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/cfg/starhash/config.toml")
        );
    }
}
