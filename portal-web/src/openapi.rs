use crate::error::ErrorResponse;
use crate::handlers::resource_files::{
    self, DeleteFileRequest, DeleteFileResponse, UploadForm, UploadResponse,
};
use axum::Json;
use utoipa::OpenApi;

/// OpenAPI文档配置
#[derive(OpenApi)]
#[openapi(
    paths(
        resource_files::upload_resource_file,
        resource_files::delete_resource_file,
    ),
    components(schemas(
        UploadForm,
        UploadResponse,
        DeleteFileRequest,
        DeleteFileResponse,
        ErrorResponse,
    )),
    tags(
        (name = "resources", description = "教学资源文件上传与删除"),
    ),
    info(
        title = "Portal API",
        description = "教学资源门户文件存储服务",
        version = "1.0.0"
    ),
    servers(
        (url = "http://localhost:8090", description = "本地开发服务器"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
