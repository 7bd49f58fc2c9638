use super::settings::StorageSettings;
use crate::error::{Result, ServiceError};
use portal_domain::{IncomingFile, StoredFile, UploadSubmission};
use portal_infra::storage::guard::normalize;
use portal_infra::storage::{naming, sanitizer};
use portal_infra::ResourceStorage;
use std::sync::Arc;
use tracing::{debug, info};

/// 校验通过的上传
struct ValidatedUpload {
    file: IncomingFile,
    grade: String,
    subject: String,
    medium: String,
}

/// 上传规划器
/// 校验文件和分类标签，计算目标路径并写入磁盘
pub struct UploadPlanner {
    storage: Arc<dyn ResourceStorage>,
    settings: Arc<StorageSettings>,
}

impl UploadPlanner {
    pub fn new(storage: Arc<dyn ResourceStorage>, settings: Arc<StorageSettings>) -> Self {
        Self { storage, settings }
    }

    pub fn upload(&self, submission: UploadSubmission) -> Result<StoredFile> {
        let upload = self.validate(submission)?;

        let taxonomy = sanitizer::taxonomy_path(
            &upload.grade,
            &upload.subject,
            &upload.medium,
            &self.settings.empty_segment_placeholder,
        );
        let guard = &self.settings.guard;
        let target_dir = normalize(
            &taxonomy
                .segments()
                .iter()
                .fold(guard.storage_root().to_path_buf(), |dir, segment| dir.join(segment)),
        );
        if !guard.contains(&target_dir) {
            return Err(ServiceError::InvalidPath(taxonomy.to_string()));
        }

        self.storage.create_dir_all(&target_dir)?;

        let file_name = naming::unique_file_name(&upload.file.name);
        let target = target_dir.join(&file_name);
        debug!("Writing {} bytes to {}", upload.file.bytes.len(), target.display());
        self.storage.write(&target, &upload.file.bytes)?;

        let relative_path = guard
            .relative_to_public(&target)
            .ok_or_else(|| ServiceError::Internal(format!("{} escaped public root", target.display())))?;

        info!(
            taxonomy = %taxonomy,
            size = upload.file.size,
            "Stored upload {}",
            relative_path
        );

        Ok(StoredFile {
            file_url: format!("/{relative_path}"),
            relative_path,
            file_name,
            file_size: upload.file.size,
        })
    }

    /// 按顺序校验：字段齐全、大小、类型；任何失败都不产生副作用
    fn validate(&self, submission: UploadSubmission) -> Result<ValidatedUpload> {
        let UploadSubmission {
            file,
            grade,
            subject,
            medium,
        } = submission;

        let file = file.filter(|f| !f.name.is_empty());
        let grade = grade.filter(|v| !v.is_empty());
        let subject = subject.filter(|v| !v.is_empty());
        let medium = medium.filter(|v| !v.is_empty());

        let (file, grade, subject, medium) = match (file, grade, subject, medium) {
            (Some(file), Some(grade), Some(subject), Some(medium)) => (file, grade, subject, medium),
            (file, grade, subject, medium) => {
                let missing = [
                    ("file", file.is_none()),
                    ("grade", grade.is_none()),
                    ("subject", subject.is_none()),
                    ("medium", medium.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                return Err(ServiceError::InvalidRequest { missing });
            }
        };

        let validator = &self.settings.validator;
        if !validator.check_size(file.size) {
            return Err(ServiceError::FileTooLarge {
                size: file.size,
                limit: validator.size_limit(),
            });
        }

        if !validator.validate(&file.name) {
            return Err(ServiceError::UnsupportedFileType {
                file_name: file.name,
                allowed: validator.allowed_extensions(),
            });
        }

        Ok(ValidatedUpload {
            file,
            grade,
            subject,
            medium,
        })
    }
}
