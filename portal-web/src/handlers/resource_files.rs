use crate::{error::ApiError, AppState};
use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use portal_domain::{IncomingFile, UploadSubmission};
use portal_service::ServiceError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

/// 上传表单（仅用于文档）
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    grade: String,
    subject: String,
    medium: String,
}

/// 上传成功响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_url: String,
    pub relative_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub message: String,
}

/// 删除请求
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteFileRequest {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

/// 删除成功响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: String,
    pub deleted_path: String,
}

/// 上传资源文件
/// POST /api/upload
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "resources",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing fields, oversized file or unsupported type", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_resource_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        ApiError::bad_request("Validation failed").with_details(json!(rejection.body_text()))
    })?;

    let service = state.resource_file_service.clone();
    let limit = service.settings().validator.size_limit();

    // 1. 从multipart中提取文件和分类字段
    let mut submission = UploadSubmission::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_failure(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => submission.file = read_file_field(field, limit).await?,
            "grade" => submission.grade = Some(read_text_field(field, limit).await?),
            "subject" => submission.subject = Some(read_text_field(field, limit).await?),
            "medium" => submission.medium = Some(read_text_field(field, limit).await?),
            _ => {}
        }
    }

    // 2. 校验并写入磁盘
    let stored = service.upload(submission).await.map_err(ApiError::upload)?;

    Ok(Json(UploadResponse {
        success: true,
        file_url: stored.file_url,
        relative_path: stored.relative_path,
        file_name: stored.file_name,
        file_size: stored.file_size,
        message: "File uploaded successfully!".to_string(),
    }))
}

/// 删除资源文件
/// DELETE /api/delete
#[utoipa::path(
    delete,
    path = "/api/delete",
    tag = "resources",
    request_body = DeleteFileRequest,
    responses(
        (status = 200, description = "File removed and empty folders pruned", body = DeleteFileResponse),
        (status = 400, description = "Invalid input, unsafe path or not a file", body = crate::error::ErrorResponse),
        (status = 403, description = "Permission denied", body = crate::error::ErrorResponse),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_resource_file(
    State(state): State<AppState>,
    payload: Result<Json<DeleteFileRequest>, JsonRejection>,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request("Invalid request data").with_details(json!(rejection.body_text()))
    })?;

    let deleted = state
        .resource_file_service
        .delete(&request.file_path)
        .await
        .map_err(ApiError::delete)?;

    info!(
        "Deleted {} and pruned {} directories",
        deleted.relative_path,
        deleted.removed_dirs.len()
    );

    Ok(Json(DeleteFileResponse {
        success: true,
        message: "File deleted successfully and empty folders cleaned!".to_string(),
        deleted_path: deleted.relative_path,
    }))
}

/// 逐块读取文件字段
/// 超过上限后不再缓存内容，只继续计数，交由上传流程返回大小错误
async fn read_file_field(mut field: Field<'_>, limit: u64) -> Result<Option<IncomingFile>, ApiError> {
    let name = field.file_name().map(str::to_string);

    let mut bytes = Vec::new();
    let mut size: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_failure(e, limit))? {
        size += chunk.len() as u64;
        if size <= limit {
            bytes.extend_from_slice(&chunk);
        } else if !bytes.is_empty() {
            bytes = Vec::new();
        }
    }

    Ok(name.map(|name| IncomingFile { name, size, bytes }))
}

async fn read_text_field(field: Field<'_>, limit: u64) -> Result<String, ApiError> {
    field.text().await.map_err(|e| multipart_failure(e, limit))
}

/// 请求体超过服务端上限时视为文件过大
fn multipart_failure(err: MultipartError, limit: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::upload(ServiceError::FileTooLarge { size: 0, limit });
    }
    warn!("Malformed multipart request: {}", err.body_text());
    ApiError::bad_request("Validation failed").with_details(json!(err.body_text()))
}
