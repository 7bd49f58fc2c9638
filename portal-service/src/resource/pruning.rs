use portal_infra::{EntryKind, ResourceStorage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 清理结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    /// 已删除的目录，按删除顺序
    pub removed: Vec<PathBuf>,
}

/// 从文件所在目录向上逐级删除空目录
/// 遇到非空目录、存储根目录或任何错误即停止
pub fn prune_upward(storage: &dyn ResourceStorage, root: &Path, file_path: &Path) -> PruneReport {
    let mut report = PruneReport::default();
    let mut current = file_path.parent();

    while let Some(dir) = current {
        if !dir.starts_with(root) || dir == root {
            break;
        }

        match storage.read_dir(dir) {
            Ok(entries) if entries.is_empty() => {
                if let Err(e) = storage.remove_dir(dir) {
                    warn!("Error during upward cleanup of {}: {}", dir.display(), e);
                    break;
                }
                debug!("Removed empty directory {}", dir.display());
                report.removed.push(dir.to_path_buf());
                current = dir.parent();
            }
            Ok(_) => break,
            Err(e) => {
                warn!("Error during upward cleanup of {}: {}", dir.display(), e);
                break;
            }
        }
    }

    report
}

/// 后序遍历整个存储根目录，删除所有空目录（根目录除外）
/// 单个子目录出错时记录并跳过
pub fn sweep_empty_dirs(storage: &dyn ResourceStorage, root: &Path) -> PruneReport {
    let mut report = PruneReport::default();
    sweep_dir(storage, root, root, &mut report);
    report
}

fn sweep_dir(storage: &dyn ResourceStorage, dir: &Path, root: &Path, report: &mut PruneReport) {
    let entries = match storage.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping cleanup for {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.iter().filter(|entry| entry.kind == EntryKind::Directory) {
        sweep_dir(storage, &entry.path, root, report);
    }

    if dir == root {
        return;
    }

    // 子目录可能已被删除，重新列出
    let is_empty = entries.is_empty()
        || match storage.read_dir(dir) {
            Ok(remaining) => remaining.is_empty(),
            Err(e) => {
                warn!("Skipping cleanup for {}: {}", dir.display(), e);
                return;
            }
        };

    if is_empty {
        match storage.remove_dir(dir) {
            Ok(()) => {
                debug!("Removed empty directory {}", dir.display());
                report.removed.push(dir.to_path_buf());
            }
            Err(e) => warn!("Skipping cleanup for {}: {}", dir.display(), e),
        }
    }
}
