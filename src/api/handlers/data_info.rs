use crate::api::types::{ApiResponse, AppError, AppState};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use runtu_comic_common::models;

/// The catalog document as plain text, unparsed.
pub async fn get_data_info(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.storage.read_data_info().await {
        Ok(text) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to read data info: {:?}", e);
            Err(AppError::InternalServerError(e.to_string()))
        }
    }
}

pub async fn get_download_info(
    State(state): State<AppState>,
    Path(comic_id): Path<String>,
) -> Result<Json<ApiResponse<models::DownloadInfo>>, AppError> {
    match state.storage.get_download_info(&comic_id).await {
        Ok(Some(info)) => Ok(ApiResponse::ok(info)),
        Ok(None) => Err(AppError::NotFound("Download info not found".to_string())),
        Err(e) => {
            tracing::error!("Failed to get download info: {:?}", e);
            Err(AppError::InternalServerError(e.to_string()))
        }
    }
}
