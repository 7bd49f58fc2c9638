use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use portal_infra::LocalResourceStorage;
use portal_service::{DefaultResourceFileService, ResourceFileService, StorageSettings};
use portal_web::AppState;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

/// 创建应用路由
pub fn create_router(state: AppState, max_request_body_size: usize) -> Router {
    let settings = state.resource_file_service.settings();
    let storage_root = settings.storage_root().to_path_buf();
    let uploads_route = format!(
        "/{}",
        storage_root
            .strip_prefix(settings.guard.public_root())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default()
    );

    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(portal_web::openapi_json))
        // 文件上传与删除
        .route("/api/upload", post(portal_web::upload_resource_file))
        .route("/api/delete", delete(portal_web::delete_resource_file))
        // 已上传文件的静态访问，与返回的fileUrl对应
        .nest_service(&uploads_route, ServeDir::new(storage_root))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_request_body_size)),
        )
        .with_state(state)
}

/// 健康检查端点
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 初始化应用状态
pub fn init_app_state(settings: StorageSettings) -> AppState {
    let storage = Arc::new(LocalResourceStorage::new());
    let resource_file_service: Arc<dyn ResourceFileService> = Arc::new(
        DefaultResourceFileService::new(storage, Arc::new(settings)),
    );

    AppState::new(resource_file_service)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
