pub mod file_validator;
pub mod guard;
pub mod local;
pub mod naming;
pub mod sanitizer;

pub use file_validator::FileValidator;
pub use guard::PathGuard;
pub use local::LocalResourceStorage;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 文件系统错误
/// 平台相关的错误码在此收敛，上层只匹配这几个分支
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Entry not found")]
    NotFound,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound,
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied,
            _ => StorageError::Io(err),
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// 目录项类型（不跟随符号链接）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// 目录项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// 资源文件存储trait
/// 所有路径均为已通过 [`PathGuard`] 校验的绝对路径
pub trait ResourceStorage: Send + Sync {
    /// 递归创建目录，已存在时不报错
    fn create_dir_all(&self, path: &Path) -> StorageResult<()>;

    /// 写入文件
    fn write(&self, path: &Path, content: &[u8]) -> StorageResult<()>;

    /// 获取目录项类型
    fn entry_kind(&self, path: &Path) -> StorageResult<EntryKind>;

    /// 删除文件
    fn remove_file(&self, path: &Path) -> StorageResult<()>;

    /// 列出目录内容
    fn read_dir(&self, path: &Path) -> StorageResult<Vec<StorageEntry>>;

    /// 删除空目录，目录非空时失败
    fn remove_dir(&self, path: &Path) -> StorageResult<()>;
}
