// handlers/students/create.rs - POST /users handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::api::StudentRequest;
use crate::app::AppState;
use crate::error::ApiError;

/// Responds with the generated id as a bare JSON number
pub async fn student_create(
    State(state): State<AppState>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<Json<i64>, ApiError> {
    let Json(request) = payload?;
    let id = state.students.save_student(request).await?;
    Ok(Json(id))
}
