// handlers/students/search.rs - GET /users/search handler
//
// Accepts `?keywords=a,b` and repeated `?keyword=` parameters; both forms
// may be combined. No keywords lists every student.

use axum::{
    extract::{RawQuery, State},
    response::Json,
};

use crate::api::StudentResponse;
use crate::app::AppState;
use crate::error::ApiError;
use crate::search::SearchQuery;

pub async fn student_search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let search = SearchQuery::parse(query.as_deref()).into_search();
    let students = state.students.search_students(&search).await?;
    Ok(Json(students))
}
