pub mod engine;
pub mod planner;
pub mod pruning;
pub mod settings;


pub use engine::DeletionEngine;
pub use planner::UploadPlanner;
pub use pruning::{prune_upward, sweep_empty_dirs, PruneReport};
pub use settings::StorageSettings;

use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use portal_domain::{DeletedFile, StoredFile, UploadSubmission};
use portal_infra::ResourceStorage;
use std::sync::Arc;

/// 资源文件服务trait
#[async_trait]
pub trait ResourceFileService: Send + Sync {
    /// 上传文件
    async fn upload(&self, submission: UploadSubmission) -> Result<StoredFile>;

    /// 删除文件并清理空目录
    async fn delete(&self, relative_path: &str) -> Result<DeletedFile>;

    /// 存储配置
    fn settings(&self) -> &StorageSettings;
}

/// 默认资源文件服务实现
/// 文件系统操作在阻塞线程池中执行
pub struct DefaultResourceFileService {
    settings: Arc<StorageSettings>,
    planner: Arc<UploadPlanner>,
    engine: Arc<DeletionEngine>,
}

impl DefaultResourceFileService {
    pub fn new(storage: Arc<dyn ResourceStorage>, settings: Arc<StorageSettings>) -> Self {
        Self {
            planner: Arc::new(UploadPlanner::new(storage.clone(), settings.clone())),
            engine: Arc::new(DeletionEngine::new(storage, settings.clone())),
            settings,
        }
    }
}

#[async_trait]
impl ResourceFileService for DefaultResourceFileService {
    async fn upload(&self, submission: UploadSubmission) -> Result<StoredFile> {
        let planner = self.planner.clone();
        tokio::task::spawn_blocking(move || planner.upload(submission))
            .await
            .map_err(|e| ServiceError::Internal(format!("Upload task failed: {}", e)))?
    }

    async fn delete(&self, relative_path: &str) -> Result<DeletedFile> {
        let engine = self.engine.clone();
        let relative_path = relative_path.to_string();
        tokio::task::spawn_blocking(move || engine.delete_file(&relative_path))
            .await
            .map_err(|e| ServiceError::Internal(format!("Delete task failed: {}", e)))?
    }

    fn settings(&self) -> &StorageSettings {
        &self.settings
    }
}
