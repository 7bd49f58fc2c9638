use crate::error::{PortalError, Result};
use portal_infra::FileValidator;
use portal_service::StorageSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub max_request_body_size: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8090,
            host: "0.0.0.0".to_string(),
            max_request_body_size: "64MB".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 公共目录，上传文件位于 `public_dir/uploads_dir` 下
    pub public_dir: PathBuf,
    pub uploads_dir: String,
    pub max_file_size: String,
    pub allowed_extensions: Vec<String>,
    pub empty_segment_placeholder: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            uploads_dir: "uploads".to_string(),
            max_file_size: "50MB".to_string(),
            allowed_extensions: FileValidator::default()
                .allowed_extensions()
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            empty_segment_placeholder: "_".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// RUST_LOG 优先
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // 如果存在.env文件，加载它
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("portal.toml").required(false))
            .add_source(
                config::Environment::with_prefix("PORTAL")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("storage.allowed_extensions"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn max_request_body_size(&self) -> Result<usize> {
        let bytes = parse_size(&self.server.max_request_body_size).ok_or_else(|| {
            PortalError::InvalidConfig(format!(
                "server.max_request_body_size: {:?}",
                self.server.max_request_body_size
            ))
        })?;
        usize::try_from(bytes)
            .map_err(|_| PortalError::InvalidConfig("server.max_request_body_size too large".to_string()))
    }

    /// 构造存储配置；公共目录为相对路径时以当前工作目录为基准
    pub fn storage_settings(&self) -> Result<StorageSettings> {
        let storage = &self.storage;

        let max_file_size = parse_size(&storage.max_file_size).ok_or_else(|| {
            PortalError::InvalidConfig(format!("storage.max_file_size: {:?}", storage.max_file_size))
        })?;

        if !is_plain_segment(&storage.uploads_dir) {
            return Err(PortalError::InvalidConfig(format!(
                "storage.uploads_dir must be a single directory name, got {:?}",
                storage.uploads_dir
            )));
        }
        if !is_plain_segment(&storage.empty_segment_placeholder) {
            return Err(PortalError::InvalidConfig(format!(
                "storage.empty_segment_placeholder must be a single directory name, got {:?}",
                storage.empty_segment_placeholder
            )));
        }
        if storage.allowed_extensions.is_empty() {
            return Err(PortalError::InvalidConfig(
                "storage.allowed_extensions must not be empty".to_string(),
            ));
        }

        let validator = storage
            .allowed_extensions
            .iter()
            .fold(FileValidator::new(), |validator, ext| validator.allow_extension(ext.as_str()))
            .max_size(max_file_size);

        let public_root = std::path::absolute(&storage.public_dir)?;

        Ok(StorageSettings::new(public_root, &storage.uploads_dir)
            .with_validator(validator)
            .with_empty_segment_placeholder(storage.empty_segment_placeholder.clone()))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

/// 解析 `50MB`、`512KB`、`1048576` 形式的大小，单位按1024进制
pub fn parse_size(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let value: u64 = digits.parse().ok()?;

    let multiplier: u64 = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1024,
        "MB" | "M" => 1024 * 1024,
        "GB" | "G" => 1024 * 1024 * 1024,
        _ => return None,
    };
    value.checked_mul(multiplier)
}
