pub mod resource_files;

pub use resource_files::*;
