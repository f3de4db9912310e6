use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CapsubError, Result};

// Default values for optional configuration fields
fn default_temperature() -> f32 {
    0.0
}

fn default_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper command-line tool
    pub binary_path: String,
    /// Model to use for transcription (tiny, base, small, medium, large)
    pub model: String,
    /// Temperature for transcription
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Run the model in fp16 precision (disable on CPU-only hosts)
    #[serde(default)]
    pub fp16: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation API endpoint URL
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Additional encoding options for subtitle embedding
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    /// - preset: encoding speed (ultrafast, fast, medium, slow, veryslow)
    /// - crf: quality (0-51, lower = better quality, 23 is default)
    /// - pix_fmt: pixel format for compatibility
    #[serde(default)]
    pub subtitle_options: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// Hostname of the YouTube metadata API, overridable via YT_API_HOSTNAME
    #[serde(default)]
    pub api_hostname: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcriber: TranscriberConfig {
                binary_path: "whisper".to_string(),
                model: "base".to_string(),
                temperature: default_temperature(),
                fp16: false,
            },
            translate: TranslateConfig {
                endpoint: "https://translate.googleapis.com".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
                subtitle_options: vec![],
            },
            youtube: YoutubeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CapsubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| CapsubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CapsubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| CapsubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load configuration from an explicit path, or from config.toml in the
    /// working directory when present, falling back to defaults. The YouTube
    /// API hostname honors the YT_API_HOSTNAME environment variable.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(config_path) => Self::from_file(config_path)?,
            None => {
                if Path::new("config.toml").exists() {
                    Self::from_file("config.toml")?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(hostname) = std::env::var("YT_API_HOSTNAME") {
            if !hostname.trim().is_empty() {
                config.youtube.api_hostname = hostname.trim().trim_end_matches('/').to_string();
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transcriber.binary_path, "whisper");
        assert_eq!(config.transcriber.model, "base");
        assert!(!config.transcriber.fp16);
        assert_eq!(config.media.binary_path, "ffmpeg");
        assert!(config.youtube.api_hostname.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.transcriber.model = "small".to_string();
        config.media.subtitle_options = vec!["-crf".to_string(), "23".to_string()];
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.transcriber.model, "small");
        assert_eq!(loaded.media.subtitle_options, vec!["-crf", "23"]);
        assert_eq!(loaded.translate.timeout_secs, 300);
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let content = r#"
[transcriber]
binary_path = "whisper"
model = "medium"

[translate]
endpoint = "https://translate.googleapis.com"

[media]
binary_path = "ffmpeg"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.transcriber.model, "medium");
        assert_eq!(config.transcriber.temperature, 0.0);
        assert_eq!(config.translate.timeout_secs, 300);
        assert!(config.media.subtitle_options.is_empty());
        assert!(config.youtube.api_hostname.is_empty());
    }
}
