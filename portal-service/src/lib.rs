pub mod error;
pub mod resource;

pub use error::{Result, ServiceError};
pub use resource::{
    DefaultResourceFileService, DeletionEngine, ResourceFileService, StorageSettings,
    UploadPlanner,
};
