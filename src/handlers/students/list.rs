// handlers/students/list.rs - GET /users handler

use axum::{extract::State, response::Json};

use crate::api::StudentResponse;
use crate::app::AppState;
use crate::error::ApiError;

pub async fn student_list(State(state): State<AppState>) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = state.students.get_all_students().await?;
    Ok(Json(students))
}
