use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::errors::{PocketlinkError, Result};

/// 默认配置文件名
pub const DEFAULT_CONFIG_PATH: &str = "pocketlink.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - storage: 存储后端与 slot 键名
/// - links: 短链接生成与有效期
/// - geo: 粗略定位
/// - logging: 控制台/文件日志
/// - diagnostics: 持久化的诊断日志
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub geo: GeoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    /// ENV 前缀：PL，分隔符：__
    /// 示例：PL__LINKS__BASE_URL=https://s.example
    pub fn try_load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("PL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// Like [`Self::try_load`], but reports problems on stderr and falls back
    /// to defaults. Logging is not up yet when configuration loads.
    pub fn load(path: Option<&str>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| PocketlinkError::serialization(format!("生成示例配置失败: {}", e)))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PocketlinkError::serialization(e.to_string()))?;

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

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    File,
    Memory,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_links_key")]
    pub links_key: String,
    #[serde(default = "default_logs_key")]
    pub logs_key: String,
}

/// 短链接配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinksConfig {
    /// 拼接短链接时使用的前缀
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_validity_minutes")]
    pub default_validity_minutes: u32,
    /// 随机短码与已有短码冲突时的最大重试次数
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: usize,
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

/// 定位来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GeoProviderKind {
    /// 不记录位置
    #[default]
    None,
    /// 使用配置中的固定坐标
    Fixed,
    /// 通过外部 HTTP API 查询
    External,
}

/// 粗略定位配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoConfig {
    #[serde(default)]
    pub provider: GeoProviderKind,
    #[serde(default = "default_geo_timeout_secs")]
    pub timeout_secs: u64,
    /// 外部 API 地址，需返回包含 `lat` 与 `lon` 字段的 JSON
    #[serde(default = "default_geo_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 为空时输出到 stderr
    #[serde(default)]
    pub file: Option<String>,
}

/// 诊断日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_diagnostics_level")]
    pub level: String,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_stack")]
    pub stack: String,
}

// ============================================================
// Default value functions
// ============================================================

fn default_data_dir() -> String {
    ".pocketlink".to_string()
}

fn default_links_key() -> String {
    "url_shortener_data".to_string()
}

fn default_logs_key() -> String {
    "diagnostic_logs".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_validity_minutes() -> u32 {
    30
}

fn default_max_generation_attempts() -> usize {
    100
}

fn default_max_batch_size() -> usize {
    5
}

fn default_geo_timeout_secs() -> u64 {
    5
}

fn default_geo_api_url() -> String {
    "http://ip-api.com/json/?fields=status,lat,lon".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

fn default_diagnostics_level() -> String {
    "info".to_string()
}

fn default_max_entries() -> usize {
    1000
}

fn default_stack() -> String {
    "cli".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            data_dir: default_data_dir(),
            links_key: default_links_key(),
            logs_key: default_logs_key(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_validity_minutes: default_validity_minutes(),
            max_generation_attempts: default_max_generation_attempts(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            provider: GeoProviderKind::default(),
            timeout_secs: default_geo_timeout_secs(),
            api_url: default_geo_api_url(),
            latitude: None,
            longitude: None,
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

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_diagnostics_level(),
            max_entries: default_max_entries(),
            stack: default_stack(),
        }
    }
}
