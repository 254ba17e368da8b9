use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use runtu_comic_storage::Storage;
use serde::Serialize;
use serde_json::json;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

// Standardized Error Response
#[derive(Debug)]
pub enum AppError {
    InternalServerError(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
