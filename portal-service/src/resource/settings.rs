use portal_infra::{FileValidator, PathGuard};
use std::path::Path;

/// 默认的空片段占位符
pub const DEFAULT_EMPTY_SEGMENT: &str = "_";

/// 存储配置，启动时构造一次，由上传和删除流程共享
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub guard: PathGuard,
    pub validator: FileValidator,
    /// 分类标签清洗为空时使用的目录名
    pub empty_segment_placeholder: String,
}

impl StorageSettings {
    pub fn new(public_root: impl AsRef<Path>, uploads_dir: &str) -> Self {
        Self {
            guard: PathGuard::new(public_root, uploads_dir),
            validator: FileValidator::default(),
            empty_segment_placeholder: DEFAULT_EMPTY_SEGMENT.to_string(),
        }
    }

    pub fn with_validator(mut self, validator: FileValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_empty_segment_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_segment_placeholder = placeholder.into();
        self
    }

    pub fn storage_root(&self) -> &Path {
        self.guard.storage_root()
    }
}
