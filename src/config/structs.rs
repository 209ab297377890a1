use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{LinkvaultError, Result};

/// Environment variable prefix for config overrides (`LV__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "LV";

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: listen address, worker count and the public base URL
/// - storage: where the link log and counter file live
/// - api: credential source for the programmatic creation endpoint
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：LV，分隔符：__
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| LinkvaultError::config(format!("Failed to build config: {}", e)))?;

        let config = settings
            .try_deserialize::<StaticConfig>()
            .map_err(|e| LinkvaultError::config(format!("Failed to deserialize config: {}", e)))?;

        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LinkvaultError::config(format!("Failed to render config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Base URL that short links are rendered against (`<public_url>/<id>`).
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Link log and counter file locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_links_file")]
    pub links_file: String,
    #[serde(default = "default_counter_file")]
    pub counter_file: String,
}

impl StorageConfig {
    /// Storage rooted at `data_dir` with the default file names.
    pub fn in_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    pub fn links_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.links_file)
    }

    pub fn counter_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.counter_file)
    }

    pub fn lock_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("linkvault.pid")
    }
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiConfig {
    /// File holding the shared API key. `LINKVAULT_API_KEY` takes precedence.
    #[serde(default)]
    pub key_file: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8085
}

fn default_public_url() -> String {
    "http://127.0.0.1:8085".to_string()
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_links_file() -> String {
    "links.csv".to_string()
}

fn default_counter_file() -> String {
    "counter".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            public_url: default_public_url(),
            workers: default_workers(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            links_file: default_links_file(),
            counter_file: default_counter_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}
