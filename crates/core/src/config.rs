//! Configuration management for the helpdesk tools.
//!
//! Configuration is merged from, in increasing precedence:
//! - Built-in defaults
//! - Config file (`.helpdesk/config.yaml` under the workspace)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::logging::LogFormat;

/// Providers the generation layer knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Default completion model: fast, mid-tier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default persona used in the answer preamble.
pub const DEFAULT_PERSONA: &str = "FieldFlo Support Assistant";

/// Environment variable holding the provider key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .helpdesk/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider ("openai" or "ollama")
    pub provider: String,

    /// Completion model identifier
    pub model: String,

    /// Sampling temperature; 0.0 disables sampling
    pub temperature: f32,

    /// Custom provider endpoint (base URL)
    pub endpoint: Option<String>,

    /// Explicit API key (HELPDESK_API_KEY)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Name of the environment variable holding the provider key
    pub api_key_env: String,

    /// Persona named in the instruction preamble
    pub persona: String,

    /// Help-center export used by the corpus retriever
    pub corpus: Option<PathBuf>,

    /// Maximum number of documents retrieved per question
    pub top_k: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Log output format
    #[serde(skip)]
    pub log_format: LogFormat,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Settings the answer generator is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSettings {
    /// Completion model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Persona named in the instruction preamble
    pub persona: String,
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    retrieval: Option<RetrievalSection>,
    assistant: Option<AssistantSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    corpus: Option<PathBuf>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssistantSection {
    persona: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    format: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "openai".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            endpoint: None,
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            persona: DEFAULT_PERSONA.to_string(),
            corpus: None,
            top_k: 4,
            log_level: None,
            log_format: LogFormat::Pretty,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `HELPDESK_WORKSPACE`: Override workspace path
    /// - `HELPDESK_CONFIG`: Path to config file
    /// - `HELPDESK_PROVIDER`: Generation provider
    /// - `HELPDESK_MODEL`: Model identifier
    /// - `HELPDESK_ENDPOINT`: Provider base URL
    /// - `HELPDESK_API_KEY`: API key
    /// - `HELPDESK_CORPUS`: Help-center export path
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use helpdesk_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Model: {}", config.model);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration with an explicit workspace and config file.
    ///
    /// `workspace` and `config_file` (typically the `--workspace` and
    /// `--config` flags) take precedence over `HELPDESK_WORKSPACE` and
    /// `HELPDESK_CONFIG`, and decide which YAML file is merged.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        } else if let Ok(workspace) = std::env::var("HELPDESK_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Some(config_file) = config_file {
            config.config_file = Some(config_file);
        } else if let Ok(config_file) = std::env::var("HELPDESK_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config.config_path();
        if config_path.exists() {
            tracing::debug!("Merging config file {:?}", config_path);
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        } else {
            tracing::trace!("No config file at {:?}, using defaults", config_path);
        }

        // Environment variables override the YAML config
        if let Ok(provider) = std::env::var("HELPDESK_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("HELPDESK_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("HELPDESK_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(corpus) = std::env::var("HELPDESK_CORPUS") {
            config.corpus = Some(PathBuf::from(corpus));
        }

        config.api_key = std::env::var("HELPDESK_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Path of the config file in effect (explicit or workspace default).
    pub fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.helpdesk_dir().join("config.yaml"))
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(temperature) = llm.temperature {
                result.temperature = temperature;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = Some(endpoint);
            }
            if let Some(api_key_env) = llm.api_key_env {
                result.api_key_env = api_key_env;
            }
        }

        if let Some(retrieval) = file.retrieval {
            if let Some(corpus) = retrieval.corpus {
                result.corpus = Some(corpus);
            }
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
        }

        if let Some(assistant) = file.assistant {
            if let Some(persona) = assistant.persona {
                result.persona = persona;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(format) = logging.format {
                result.log_format = LogFormat::parse(&format).ok_or_else(|| {
                    AppError::Config(format!("Unknown logging format: {}", format))
                })?;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over environment variables and the config file.
    /// Workspace and config file flags go through [`AppConfig::load_from`].
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .helpdesk directory.
    pub fn helpdesk_dir(&self) -> PathBuf {
        self.workspace.join(".helpdesk")
    }

    /// Resolve the corpus path against the workspace.
    pub fn corpus_path(&self) -> Option<PathBuf> {
        self.corpus.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.workspace.join(p)
            }
        })
    }

    /// Resolve the provider API key.
    ///
    /// `HELPDESK_API_KEY` wins; otherwise the variable named by `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    /// Settings handed to the answer generator at construction.
    pub fn answer_settings(&self) -> AnswerSettings {
        AnswerSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            persona: self.persona.clone(),
        }
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();

        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model cannot be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config("topK must be at least 1".to_string()));
        }

        if provider == "openai" && self.resolve_api_key().is_none() {
            return Err(AppError::Config(format!(
                "API key not found. Set HELPDESK_API_KEY or {}",
                self.api_key_env
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let helpdesk_dir = dir.join(".helpdesk");
        fs::create_dir_all(&helpdesk_dir).unwrap();
        let path = helpdesk_dir.join("config.yaml");
        fs::write(&path, contents).unwrap();
        path
    }

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            workspace: dir.to_path_buf(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.persona, "FieldFlo Support Assistant");
        assert_eq!(config.top_k, 4);
        assert!(!config.verbose);
    }

    #[test]
    fn test_answer_settings_from_config() {
        let mut config = AppConfig::default();
        config.model = "gpt-4o".to_string();
        config.persona = "Acme Help Bot".to_string();

        let settings = config.answer_settings();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.temperature, 0.0);
        assert_eq!(settings.persona, "Acme Help Bot");
    }

    #[test]
    fn test_merge_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            temp_dir.path(),
            r#"
llm:
  provider: ollama
  model: llama3.2
  temperature: 0.2
  endpoint: http://localhost:11434
  apiKeyEnv: ACME_KEY
retrieval:
  corpus: help-center.yaml
  topK: 6
assistant:
  persona: Acme Support Assistant
logging:
  level: debug
  color: false
  format: json
"#,
        );

        let merged = config_in(temp_dir.path()).merge_yaml(&path).unwrap();
        assert_eq!(merged.provider, "ollama");
        assert_eq!(merged.model, "llama3.2");
        assert_eq!(merged.temperature, 0.2);
        assert_eq!(merged.endpoint.as_deref(), Some("http://localhost:11434"));
        assert_eq!(merged.api_key_env, "ACME_KEY");
        assert_eq!(merged.top_k, 6);
        assert_eq!(merged.persona, "Acme Support Assistant");
        assert_eq!(merged.log_level.as_deref(), Some("debug"));
        assert_eq!(merged.log_format, LogFormat::Json);
        assert!(merged.no_color);
        assert_eq!(
            merged.corpus_path(),
            Some(temp_dir.path().join("help-center.yaml"))
        );
    }

    #[test]
    fn test_merge_yaml_partial_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), "assistant:\n  persona: Docs Bot\n");

        let merged = config_in(temp_dir.path()).merge_yaml(&path).unwrap();
        assert_eq!(merged.persona, "Docs Bot");
        assert_eq!(merged.model, DEFAULT_MODEL);
        assert_eq!(merged.temperature, 0.0);
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), "llm: [not, a, map");

        let result = config_in(temp_dir.path()).merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_merge_yaml_unknown_log_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), "logging:\n  format: xml\n");

        let result = config_in(temp_dir.path()).merge_yaml(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "ollama");
        assert_eq!(overridden.model, "llama3.2");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_corpus_path_absolute_is_kept() {
        let mut config = AppConfig::default();
        config.corpus = Some(PathBuf::from("/srv/help/corpus.json"));
        assert_eq!(
            config.corpus_path(),
            Some(PathBuf::from("/srv/help/corpus.json"))
        );
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit_key() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-explicit".to_string());
        config.api_key_env = "HELPDESK_TEST_UNSET_KEY_VAR".to_string();
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn test_load_from_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("custom.yaml");
        fs::write(
            &custom,
            "llm:\n  model: llama3.2\nassistant:\n  persona: Docs Bot\n",
        )
        .unwrap();

        let config = AppConfig::load_from(None, Some(custom.clone())).unwrap();
        assert_eq!(config.config_file, Some(custom));
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.persona, "Docs Bot");
    }

    #[test]
    fn test_load_from_workspace_reads_its_config() {
        let temp_dir = TempDir::new().unwrap();
        write_config(
            temp_dir.path(),
            "retrieval:\n  corpus: help-center.yaml\n  topK: 2\n",
        );

        let config = AppConfig::load_from(Some(temp_dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.workspace, temp_dir.path());
        assert_eq!(config.top_k, 2);
        assert_eq!(
            config.corpus_path(),
            Some(temp_dir.path().join("help-center.yaml"))
        );
    }

    #[test]
    fn test_load_from_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load_from(None, Some(temp_dir.path().join("absent.yaml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_resolve_api_key_ignores_blank_explicit_key() {
        let mut config = AppConfig::default();
        config.api_key = Some("   ".to_string());
        config.api_key_env = "HELPDESK_TEST_UNSET_KEY_VAR".to_string();
        assert_eq!(config.resolve_api_key(), None);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ollama_without_key() {
        let mut config = AppConfig::default();
        config.provider = "ollama".to_string();
        config.api_key_env = "HELPDESK_TEST_UNSET_KEY_VAR".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_openai_requires_key() {
        let mut config = AppConfig::default();
        config.api_key = None;
        config.api_key_env = "HELPDESK_TEST_UNSET_KEY_VAR".to_string();
        assert!(config.validate().is_err());

        config.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-test".to_string());
        config.temperature = 2.5;
        assert!(config.validate().is_err());

        config.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_top_k_zero() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-test".to_string());
        config.top_k = 0;
        assert!(config.validate().is_err());
    }
}
