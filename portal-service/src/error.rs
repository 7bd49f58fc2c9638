use portal_infra::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Missing required fields: {}", .missing.join(", "))]
    InvalidRequest { missing: Vec<&'static str> },

    #[error("File size {size} exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type: {file_name}")]
    UnsupportedFileType {
        file_name: String,
        allowed: Vec<String>,
    },

    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 根据文件系统错误细分删除流程中的失败类型
    pub fn from_storage(err: StorageError, path: &str) -> Self {
        match err {
            StorageError::NotFound => ServiceError::NotFound(path.to_string()),
            StorageError::PermissionDenied => ServiceError::PermissionDenied(path.to_string()),
            other => ServiceError::Storage(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
