//! SNA Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Serialized classifier artifacts
    pub models: ModelsConfig,

    /// Pretrained inference facilities
    pub inference: InferenceConfig,

    /// Analysis thresholds
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Load from an optional file, then apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override values with environment variables (env takes precedence)
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        // Server
        if let Ok(host) = std::env::var("SNA_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SNA_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SNA_PORT".to_string(),
                value: port,
            })?;
        }

        // Artifacts
        if let Ok(path) = std::env::var("SNA_VECTORIZER_PATH") {
            self.models.vectorizer_path = path.into();
        }
        if let Ok(path) = std::env::var("SNA_CLASSIFIER_PATH") {
            self.models.classifier_path = path.into();
        }

        // Inference
        if let Ok(url) = std::env::var("SNA_INFERENCE_URL") {
            self.inference.endpoint = url;
        }
        if let Ok(token) = std::env::var("HF_API_TOKEN") {
            self.inference.api_token = Some(token);
        }
        if let Ok(model) = std::env::var("SNA_SUMMARIZATION_MODEL") {
            self.inference.summarization_model = model;
        }
        if let Ok(model) = std::env::var("SNA_QA_MODEL") {
            self.inference.qa_model = model;
        }
        if let Ok(model) = std::env::var("SNA_NER_MODEL") {
            self.inference.ner_model = model;
        }
        if let Ok(device) = std::env::var("SNA_DEVICE") {
            self.inference.device = device.parse()?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.summary_min_length > self.analysis.summary_max_length {
            return Err(ConfigError::InvalidValue {
                key: "analysis.summary_min_length".to_string(),
                value: format!(
                    "{} (greater than summary_max_length {})",
                    self.analysis.summary_min_length, self.analysis.summary_max_length
                ),
            });
        }

        let models = [
            ("inference.summarization_model", &self.inference.summarization_model),
            ("inference.qa_model", &self.inference.qa_model),
            ("inference.ner_model", &self.inference.ner_model),
        ];
        for (key, model) in models {
            if model.trim().is_empty() {
                return Err(ConfigError::MissingRequired(key.to_string()));
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Paths to the two serialized classifier artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// TF-IDF feature extractor
    pub vectorizer_path: PathBuf,

    /// Linear classifier
    pub classifier_path: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: PathBuf::from("models/tfidf.json"),
            classifier_path: PathBuf::from("models/classifier.json"),
        }
    }
}

/// Pretrained inference facility configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL; the model id is appended as a path segment
    pub endpoint: String,

    /// Bearer token for the hosted inference API
    pub api_token: Option<String>,

    /// Summarization model id
    pub summarization_model: String,

    /// Question-answering model id
    pub qa_model: String,

    /// Named-entity recognition model id
    pub ner_model: String,

    /// Compute device shared by all facilities
    pub device: Device,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Block until the remote model is loaded instead of failing fast
    pub wait_for_model: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            api_token: None,
            summarization_model: "facebook/bart-large-cnn".to_string(),
            qa_model: "distilbert-base-cased-distilled-squad".to_string(),
            ner_model: "dbmdz/bert-large-cased-finetuned-conll03-english".to_string(),
            device: Device::Cpu,
            timeout_secs: 120,
            wait_for_model: true,
        }
    }
}

/// Compute device for neural inference
///
/// Every facility shares the non-accelerated device; no other value is
/// accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
        }
    }
}

impl std::str::FromStr for Device {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            _ => Err(ConfigError::InvalidValue {
                key: "SNA_DEVICE".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Analysis thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum summary length in tokens
    pub summary_min_length: u32,

    /// Maximum summary length in tokens
    pub summary_max_length: u32,

    /// Summarize only when the article has strictly more words than this
    pub min_summary_words: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            summary_min_length: 20,
            summary_max_length: 50,
            min_summary_words: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
