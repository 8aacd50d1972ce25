use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::student::STUDENTS_TABLE;
use crate::database::models::{NewStudent, Student};
use crate::database::query_builder::QueryBuilder;
use crate::filter::FilterData;
use crate::search::StudentSearch;

/// Storage operations the student service relies on.
///
/// Scans return rows in ascending id order. Implementations must reject a
/// write that would duplicate a `(first_name, last_name)` pair with
/// [`DatabaseError::UniqueViolation`], independently of any check the caller
/// made beforehand.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<Student>, DatabaseError>;

    async fn find_by_name_pair(&self, first_name: &str, last_name: &str) -> Result<Vec<Student>, DatabaseError>;

    async fn find_matching(&self, search: &StudentSearch) -> Result<Vec<Student>, DatabaseError>;

    /// Inserts when `id` is `None`, otherwise overwrites the row with that id.
    /// Overwriting a missing id fails with [`DatabaseError::NotFound`].
    async fn save(&self, id: Option<i64>, fields: NewStudent) -> Result<Student, DatabaseError>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// PostgreSQL-backed repository over the `students` table
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn select_any(&self, filter_data: FilterData) -> Result<Vec<Student>, DatabaseError> {
        QueryBuilder::<Student>::new(STUDENTS_TABLE)?
            .filter(filter_data)?
            .select_all(&self.pool)
            .await
    }

    async fn select_one(&self, filter_data: FilterData) -> Result<Option<Student>, DatabaseError> {
        QueryBuilder::<Student>::new(STUDENTS_TABLE)?
            .filter(filter_data)?
            .select_optional(&self.pool)
            .await
    }

    async fn insert(&self, fields: NewStudent) -> Result<Student, DatabaseError> {
        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (first_name, last_name, date_of_birth, address)
             VALUES ($1, $2, $3, $4)
             RETURNING id, first_name, last_name, date_of_birth, address",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.date_of_birth)
        .bind(&fields.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(student)
    }

    async fn update(&self, id: i64, fields: NewStudent) -> Result<Student, DatabaseError> {
        sqlx::query_as::<_, Student>(
            "UPDATE students
             SET first_name = $1, last_name = $2, date_of_birth = $3, address = $4
             WHERE id = $5
             RETURNING id, first_name, last_name, date_of_birth, address",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.date_of_birth)
        .bind(&fields.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("student {}", id)))
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        self.select_one(FilterData::with_where(json!({ "id": id }))).await
    }

    async fn find_all(&self) -> Result<Vec<Student>, DatabaseError> {
        self.select_any(FilterData::default().ordered_by("id asc")).await
    }

    async fn find_by_name_pair(&self, first_name: &str, last_name: &str) -> Result<Vec<Student>, DatabaseError> {
        let where_clause = json!({ "first_name": first_name, "last_name": last_name });
        self.select_any(FilterData::with_where(where_clause).ordered_by("id asc")).await
    }

    async fn find_matching(&self, search: &StudentSearch) -> Result<Vec<Student>, DatabaseError> {
        self.select_any(search.to_filter()).await
    }

    async fn save(&self, id: Option<i64>, fields: NewStudent) -> Result<Student, DatabaseError> {
        match id {
            None => self.insert(fields).await,
            Some(id) => self.update(id, fields).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
