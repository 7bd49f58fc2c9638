pub mod resource;

pub use resource::{DeletedFile, IncomingFile, StoredFile, TaxonomyPath, UploadSubmission};
