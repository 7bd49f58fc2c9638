use portal_service::ResourceFileService;
use std::sync::Arc;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub resource_file_service: Arc<dyn ResourceFileService>,
}

impl AppState {
    pub fn new(resource_file_service: Arc<dyn ResourceFileService>) -> Self {
        Self {
            resource_file_service,
        }
    }
}
