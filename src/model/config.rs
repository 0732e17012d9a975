use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "TRIAGE_AGENT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ALERT_TIMEOUT_SECS: u64 = 10;

/// Pipeline timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound for one LLM extraction call; on expiry the pipeline
    /// falls back to the degraded record.
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,
    /// Upper bound for one alert dispatch; on expiry a failed alert is
    /// recorded and the pipeline keeps going.
    #[serde(default = "default_alert_timeout_secs")]
    pub alert_timeout_secs: u64,
}

fn default_extraction_timeout_secs() -> u64 {
    DEFAULT_EXTRACTION_TIMEOUT_SECS
}

fn default_alert_timeout_secs() -> u64 {
    DEFAULT_ALERT_TIMEOUT_SECS
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction_timeout_secs: DEFAULT_EXTRACTION_TIMEOUT_SECS,
            alert_timeout_secs: DEFAULT_ALERT_TIMEOUT_SECS,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        // Load config file
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let pipeline = Self::load_config_file(&config_path)
            .map(|cf| cf.pipeline)
            .unwrap_or_default();

        Self {
            pipeline,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Handle empty file
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_defaults_apply_to_empty_yaml() {
        let cf: ConfigFile = serde_yaml::from_str("pipeline: {}").unwrap();
        assert_eq!(cf.pipeline.extraction_timeout_secs, 30);
        assert_eq!(cf.pipeline.alert_timeout_secs, 10);
    }

    #[test]
    fn pipeline_overrides_parse() {
        let yaml = "pipeline:\n  extraction_timeout_secs: 45\n  alert_timeout_secs: 5\n";
        let cf: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cf.pipeline.extraction_timeout_secs, 45);
        assert_eq!(cf.pipeline.alert_timeout_secs, 5);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }
}
