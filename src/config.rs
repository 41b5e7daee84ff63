use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub subtitles: SubtitleConfig,
    pub output: OutputConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
    /// Directory holding downloaded model files.
    pub model_dir: PathBuf,
}

/// Subtitle layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubtitleConfig {
    /// Maximum characters per displayed line.
    pub max_line_length: usize,
    /// Maximum seconds a single line may stay on screen.
    pub max_line_duration: f64,
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for generated subtitle files and burned videos.
    pub dir: PathBuf,
    /// Burn subtitles into the output video.
    pub burn: bool,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            model_dir: PathBuf::from("models"),
        }
    }
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            max_line_length: defaults::MAX_LINE_LENGTH,
            max_line_duration: defaults::MAX_LINE_DURATION,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            burn: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML or invalid values.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate threshold values that the segmenter depends on.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.subtitles.max_line_length == 0 {
            anyhow::bail!("subtitles.max_line_length must be greater than zero");
        }
        if self.subtitles.max_line_duration <= 0.0 {
            anyhow::bail!("subtitles.max_line_duration must be greater than zero");
        }
        Ok(())
    }

    /// Default configuration file path: `$XDG_CONFIG_HOME/subgen/config.toml`.
    #[cfg(feature = "cli")]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("subgen")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_has_sane_thresholds() {
        let config = Config::default();
        assert_eq!(config.subtitles.max_line_length, 40);
        assert_eq!(config.subtitles.max_line_duration, 3.0);
        assert!(config.output.burn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_parses_partial_file_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[subtitles]\nmax_line_length = 32").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.subtitles.max_line_length, 32);
        // Unspecified sections fall back to defaults
        assert_eq!(config.subtitles.max_line_duration, 3.0);
        assert_eq!(config.stt.model, "base.en");
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn load_rejects_zero_line_length() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[subtitles]\nmax_line_length = 0").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn load_or_default_returns_defaults_for_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/subgen.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
