use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Destination size limits and pipeline thresholds.
///
/// Defaults reflect the destinations' published constraints; override via
/// config files or `RELAY__LIMITS__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Per-tweet character cap.
    pub twitter_chars: usize,
    /// Per-post character cap for the LinkedIn chain.
    pub linkedin_chars: usize,
    /// Per-chunk character cap for Notion rich-text properties.
    pub notion_chunk_chars: usize,
    /// Maximum rich-text chunks per Notion property.
    pub notion_max_chunks: usize,
    /// Extracted content shorter than this is treated as a failed
    /// generation and replaced with a diagnostic placeholder.
    pub min_content_chars: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            twitter_chars: 280,
            linkedin_chars: 2800,
            notion_chunk_chars: 2000,
            notion_max_chunks: 100,
            min_content_chars: 80,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("RELAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
