use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const CONFIG_DIR_NAME: &str = "arka";
const CONFIG_FILE_NAME: &str = "config.json";

const CONFIG_TEMPLATE: &str = r#"{
  "extraction": {
    "default_agent_source": "PMO"
  },
  "capture": {
    "max_content_bytes": 1048576
  },
  "logging": {
    "level": "info"
  }
}"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Agent recorded on blocks when the caller names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_agent_source: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    #[serde(default = "CaptureConfig::default_max_content_bytes")]
    pub max_content_bytes: usize,
    /// Project used when a capture does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<Uuid>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: Self::default_max_content_bytes(),
            default_project_id: None,
        }
    }
}

impl CaptureConfig {
    const fn default_max_content_bytes() -> usize {
        1024 * 1024
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Config {
    /// Path of the config file, `~/arka/config.json`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config file, or fall back to defaults when it does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set extraction.default_agent_source to the agent you capture for");
        println!("   2. Optionally set capture.default_project_id to a project UUID");
        println!("   3. Run 'arka extract -m \"Objectif: ...\"' to try the extractor");
        println!();
        println!("🔧 Configuration options:");
        println!("   - capture.max_content_bytes: Largest capture accepted, in bytes");
        println!("   - logging.level: tracing filter, overridden by RUST_LOG");
        println!();
        Ok(())
    }
}
