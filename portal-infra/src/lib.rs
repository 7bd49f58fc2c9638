pub mod storage;

pub use storage::{
    EntryKind, FileValidator, LocalResourceStorage, PathGuard, ResourceStorage, StorageEntry,
    StorageError, StorageResult,
};
