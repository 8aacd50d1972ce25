// handlers/students/show.rs - GET /users/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};

use crate::api::StudentResponse;
use crate::app::AppState;
use crate::error::ApiError;

pub async fn student_show(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let Path(id) = id?;
    let student = state.students.get_student_by_id(id).await?;
    Ok(Json(student))
}
