// handlers/students/update.rs - PUT /users/:id handler

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};

use crate::api::StudentRequest;
use crate::app::AppState;
use crate::error::ApiError;

pub async fn student_update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<Json<i64>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let id = state.students.update_student(id, request).await?;
    Ok(Json(id))
}
