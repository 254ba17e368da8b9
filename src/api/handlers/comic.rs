use crate::api::types::{ApiResponse, AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use runtu_comic_common::models;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListComicsQuery {
    pub search: Option<String>,
}

pub async fn list_comics(
    State(state): State<AppState>,
    Query(query): Query<ListComicsQuery>,
) -> Result<Json<ApiResponse<Vec<models::Comic>>>, AppError> {
    let result = match query.search.as_deref() {
        Some(keyword) => state.storage.search_comics(keyword).await,
        None => state.storage.get_comics().await,
    };

    match result {
        Ok(comics) => Ok(ApiResponse::ok(comics)),
        Err(e) => {
            tracing::error!("Failed to list comics: {:?}", e);
            Err(AppError::InternalServerError(e.to_string()))
        }
    }
}

pub async fn get_comic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<models::ComicDetails>>, AppError> {
    match state.storage.get_comic_details(&id).await {
        Ok(Some(details)) => {
            tracing::info!(
                "Serving comic {} with {} chapters",
                id,
                details.chapters.len()
            );
            Ok(ApiResponse::ok(details))
        }
        Ok(None) => Err(AppError::NotFound("Comic not found".to_string())),
        Err(e) => {
            tracing::error!("Failed to get comic: {:?}", e);
            Err(AppError::InternalServerError(e.to_string()))
        }
    }
}
