// handlers/students/delete.rs - DELETE /users/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;

pub async fn student_delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<i64>, ApiError> {
    let Path(id) = id?;
    let id = state.students.delete_student(id).await?;
    Ok(Json(id))
}
