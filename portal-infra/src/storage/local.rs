use super::{EntryKind, ResourceStorage, StorageEntry, StorageResult};
use std::fs;
use std::path::Path;

/// 本地文件存储实现
#[derive(Debug, Clone, Default)]
pub struct LocalResourceStorage;

impl LocalResourceStorage {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::Other
    }
}

impl ResourceStorage for LocalResourceStorage {
    fn create_dir_all(&self, path: &Path) -> StorageResult<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn write(&self, path: &Path, content: &[u8]) -> StorageResult<()> {
        fs::write(path, content)?;
        Ok(())
    }

    fn entry_kind(&self, path: &Path) -> StorageResult<EntryKind> {
        let metadata = fs::symlink_metadata(path)?;
        Ok(kind_of(metadata.file_type()))
    }

    fn remove_file(&self, path: &Path) -> StorageResult<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> StorageResult<Vec<StorageEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(StorageEntry {
                path: entry.path(),
                kind: kind_of(entry.file_type()?),
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn remove_dir(&self, path: &Path) -> StorageResult<()> {
        fs::remove_dir(path)?;
        Ok(())
    }
}
