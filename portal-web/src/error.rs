use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portal_service::ServiceError;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, warn};
use utoipa::ToSchema;

/// 失败响应体
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

/// 接口错误
/// 只暴露概括性的提示，内部错误信息仅写入日志
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 上传流程的错误映射
    pub fn upload(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidRequest { missing } => {
                Self::bad_request("All fields are required").with_details(json!({ "missing": missing }))
            }
            ServiceError::FileTooLarge { limit, .. } => {
                Self::bad_request(format!("File size exceeds {} limit", human_size(limit)))
            }
            ServiceError::UnsupportedFileType { allowed, .. } => Self::bad_request(format!(
                "Invalid file type. Allowed types: {}",
                allowed.join(", ")
            )),
            other => {
                error!("Upload error: {}", other);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error occurred while uploading the file",
                )
            }
        }
    }

    /// 删除流程的错误映射
    pub fn delete(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidPath(path) => {
                warn!("Rejected unsafe delete path {:?}", path);
                Self::bad_request("Invalid file path")
            }
            ServiceError::NotAFile(_) => Self::bad_request("Path does not point to a file"),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "File not found"),
            ServiceError::PermissionDenied(path) => {
                warn!("Permission denied deleting {}", path);
                Self::new(StatusCode::FORBIDDEN, "Permission denied")
            }
            ServiceError::Storage(e) => {
                error!("Unexpected file operation error: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error occurred")
            }
            other => {
                error!("Delete error: {}", other);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error occurred while deleting file",
                )
            }
        }
    }
}

/// 以整数单位展示大小，例如 `50MB`
fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}
