use crate::api::types::{ApiResponse, AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use runtu_comic_common::models;

pub async fn get_chapter(
    State(state): State<AppState>,
    Path((comic_id, chapter_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<models::Chapter>>, AppError> {
    // A missing chapter file and a missing row are both a 404 here.
    match state.storage.get_chapter(&comic_id, &chapter_id).await {
        Some(chapter) => Ok(ApiResponse::ok(chapter)),
        None => Err(AppError::NotFound("Chapter not found".to_string())),
    }
}
