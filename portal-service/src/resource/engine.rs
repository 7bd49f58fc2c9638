use super::pruning::{prune_upward, sweep_empty_dirs};
use super::settings::StorageSettings;
use crate::error::{Result, ServiceError};
use portal_domain::DeletedFile;
use portal_infra::{EntryKind, ResourceStorage};
use std::sync::Arc;
use tracing::info;

/// 删除引擎
/// 校验路径后删除文件，再清理因此变空的目录
pub struct DeletionEngine {
    storage: Arc<dyn ResourceStorage>,
    settings: Arc<StorageSettings>,
}

impl DeletionEngine {
    pub fn new(storage: Arc<dyn ResourceStorage>, settings: Arc<StorageSettings>) -> Self {
        Self { storage, settings }
    }

    /// 只有文件本身的删除失败会返回错误，目录清理失败仅记录日志
    pub fn delete_file(&self, relative_path: &str) -> Result<DeletedFile> {
        if relative_path.is_empty() {
            return Err(ServiceError::InvalidPath(String::new()));
        }

        let guard = &self.settings.guard;
        let target = guard
            .confine(relative_path)
            .ok_or_else(|| ServiceError::InvalidPath(relative_path.to_string()))?;

        let kind = self
            .storage
            .entry_kind(&target)
            .map_err(|e| ServiceError::from_storage(e, relative_path))?;
        if kind != EntryKind::File {
            return Err(ServiceError::NotAFile(relative_path.to_string()));
        }

        self.storage
            .remove_file(&target)
            .map_err(|e| ServiceError::from_storage(e, relative_path))?;

        let root = guard.storage_root();
        let mut removed_dirs = prune_upward(self.storage.as_ref(), root, &target).removed;
        removed_dirs.extend(sweep_empty_dirs(self.storage.as_ref(), root).removed);

        info!(
            removed_dirs = removed_dirs.len(),
            "Deleted {}",
            relative_path
        );

        Ok(DeletedFile {
            relative_path: relative_path.to_string(),
            removed_dirs,
        })
    }
}
