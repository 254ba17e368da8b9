use crate::api::handlers::{chapter, comic, data_info};
use crate::api::types::AppState;
use axum::{routing::get, Router};
use runtu_comic_storage::Storage;
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub fn create_router(storage: Storage, static_dir: Option<PathBuf>) -> Router {
    let state = AppState { storage };
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/comics", get(comic::list_comics))
        .route("/api/comic/:id", get(comic::get_comic))
        .route(
            "/api/chapter/:comic_id/:chapter_id",
            get(chapter::get_chapter),
        )
        .route("/api/data-info", get(data_info::get_data_info))
        .route(
            "/api/download-info/:comic_id",
            get(data_info::get_download_info),
        )
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
