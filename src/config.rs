//! Deployment configuration, persisted as TOML.
//!
//! Every field defaults to the reference deployment, so an empty file (or no
//! file at all) reproduces the names issued by the bundled defaults. Setting a
//! private `key`/`tweak` gives a deployment its own name space.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codec::{CodecConfig, DEFAULT_KEY, DEFAULT_TWEAK, DEFAULT_WORDS, DigitOrder, StarHash};
use crate::error::{ConfigError, StarhashResult};
use crate::grid::{DEFAULT_NSIDE, Healpix};
use crate::paths::StarhashPaths;
use crate::vocabulary::VocabularySource;

/// Codec settings for a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StarhashConfig {
    /// Transform key (UTF-8 bytes).
    #[serde(default = "default_key")]
    pub key: String,
    /// Transform tweak (UTF-8 bytes).
    #[serde(default = "default_tweak")]
    pub tweak: String,
    /// HEALPix resolution parameter.
    #[serde(default = "default_nside")]
    pub nside: u32,
    /// Words per name.
    #[serde(default = "default_words")]
    pub words: u32,
    #[serde(default)]
    pub digit_order: DigitOrder,
    /// Vocabulary file; the bundled list when absent.
    #[serde(default)]
    pub vocabulary: Option<PathBuf>,
}

fn default_key() -> String {
    String::from_utf8_lossy(DEFAULT_KEY).into_owned()
}
fn default_tweak() -> String {
    String::from_utf8_lossy(DEFAULT_TWEAK).into_owned()
}
fn default_nside() -> u32 {
    DEFAULT_NSIDE
}
fn default_words() -> u32 {
    DEFAULT_WORDS
}

impl Default for StarhashConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            tweak: default_tweak(),
            nside: default_nside(),
            words: default_words(),
            digit_order: DigitOrder::default(),
            vocabulary: None,
        }
    }
}

impl StarhashConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    /// Load from an explicit path, else the XDG config file if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let Ok(paths) = StarhashPaths::resolve() else {
            return Ok(Self::default());
        };
        let file = paths.config_file();
        if file.is_file() {
            tracing::debug!(path = %file.display(), "loading config");
            Self::load(&file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn vocabulary_source(&self) -> VocabularySource {
        match &self.vocabulary {
            Some(path) => VocabularySource::File(path.clone()),
            None => VocabularySource::Bundled,
        }
    }

    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            key: self.key.as_bytes().to_vec(),
            tweak: self.tweak.as_bytes().to_vec(),
            words: self.words,
            digit_order: self.digit_order,
        }
    }

    /// Construct the codec this configuration describes.
    pub fn build_codec(&self) -> StarhashResult<StarHash> {
        let grid = Healpix::new(self.nside)?;
        Ok(StarHash::new(
            grid,
            &self.vocabulary_source(),
            &self.codec_config(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_reference_defaults() {
        let config = StarhashConfig::from_toml("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, StarhashConfig::default());
        assert_eq!(config.key, "starhash!");
        assert_eq!(config.tweak, "opensource");
        assert_eq!(config.nside, 65_536);
        assert_eq!(config.words, 3);
        assert_eq!(config.digit_order, DigitOrder::LeastSignificantFirst);
        assert_eq!(config.vocabulary_source(), VocabularySource::Bundled);
    }

    #[test]
    fn fields_override_defaults() {
        let config = StarhashConfig::from_toml(
            r#"
            key = "private-key"
            nside = 1024
            words = 4
            digit_order = "most-significant-first"
            vocabulary = "/srv/words.txt"
            "#,
            Path::new("deploy.toml"),
        )
        .unwrap();
        assert_eq!(config.key, "private-key");
        assert_eq!(config.tweak, "opensource");
        assert_eq!(config.nside, 1024);
        assert_eq!(config.words, 4);
        assert_eq!(config.digit_order, DigitOrder::MostSignificantFirst);
        assert_eq!(
            config.vocabulary_source(),
            VocabularySource::File(PathBuf::from("/srv/words.txt"))
        );
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let err = StarhashConfig::from_toml("colour = 3", Path::new("bad.toml")).unwrap_err();
        match err {
            ConfigError::Parse { path, message } => {
                assert_eq!(path, "bad.toml");
                assert!(message.contains("colour"), "{message}");
                assert!(!message.contains('\n'), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "words = 4\n").unwrap();
        let config = StarhashConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.words, 4);
    }

    #[test]
    fn missing_explicit_path_is_read_error() {
        let err = StarhashConfig::discover(Some(Path::new("/nonexistent/starhash.toml")));
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn codec_config_carries_key_bytes() {
        let config = StarhashConfig {
            key: "k".into(),
            tweak: "abcdefghij".into(),
            ..Default::default()
        };
        let codec = config.codec_config();
        assert_eq!(codec.key, b"k");
        assert_eq!(codec.tweak, b"abcdefghij");
    }
}
