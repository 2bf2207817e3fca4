use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Bucket, WordFrequencyOptions};
use crate::error::ConfigError;
use crate::sentiment::{DEFAULT_NEGATIVE, DEFAULT_POSITIVE, MatchMode, PolarityThresholds};

pub const CONFIG_FILE: &str = "pulse.toml";
pub const CONFIG_ENV: &str = "PULSE_CONFIG";

/// Written by `pulse init`. Mirrors [`PulseConfig::default`].
pub const DEFAULT_CONFIG_TOML: &str = r#"# pulse configuration

[classifier]
# "keyword" counts positive/negative keywords; "lexicon" scores polarity.
algorithm = "keyword"
# "token" matches whole whitespace-separated words, "substring" matches anywhere.
match_mode = "token"
positive = ["good", "great", "excellent", "happy", "love", "positive", "wonderful"]
negative = ["bad", "sad", "poor", "terrible", "hate", "negative", "angry"]

[classifier.thresholds]
positive = 0.05
negative = -0.05
inclusive = true

[words]
top_n = 5
stopwords = []
alphabetic_only = false

[timeline]
# "day" or "month"
bucket = "day"
"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Keyword,
    Lexicon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub algorithm: Algorithm,
    pub match_mode: MatchMode,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub thresholds: PolarityThresholds,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            match_mode: MatchMode::default(),
            positive: DEFAULT_POSITIVE.iter().map(ToString::to_string).collect(),
            negative: DEFAULT_NEGATIVE.iter().map(ToString::to_string).collect(),
            thresholds: PolarityThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    pub top_n: usize,
    pub stopwords: Vec<String>,
    pub alphabetic_only: bool,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            stopwords: Vec::new(),
            alphabetic_only: false,
        }
    }
}

impl WordsConfig {
    pub fn options(&self) -> WordFrequencyOptions {
        WordFrequencyOptions::new(self.top_n)
            .with_stopwords(self.stopwords.as_slice())
            .alphabetic_only(self.alphabetic_only)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub bucket: Bucket,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub classifier: ClassifierConfig,
    pub words: WordsConfig,
    pub timeline: TimelineConfig,
}

impl PulseConfig {
    /// Resolve configuration: explicit path, then `PULSE_CONFIG`, then the
    /// nearest `pulse.toml` above the current directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(find_config_file);

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("no {CONFIG_FILE} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let classifier = &self.classifier;
        if classifier.thresholds.negative > classifier.thresholds.positive {
            return Err(ConfigError::Invalid {
                field: "classifier.thresholds",
                reason: format!(
                    "negative ({}) is above positive ({})",
                    classifier.thresholds.negative, classifier.thresholds.positive
                ),
            });
        }
        if classifier.positive.iter().all(|w| w.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "classifier.positive",
                reason: "at least one keyword is required".to_string(),
            });
        }
        if classifier.negative.iter().all(|w| w.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "classifier.negative",
                reason: "at least one keyword is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Finds `pulse.toml` by walking up from the current directory.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

pub fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start;

    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        dir = dir.parent()?;
    }
}
