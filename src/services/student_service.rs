use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::{FieldErrors, StudentRequest, StudentResponse};
use crate::database::{DatabaseError, StudentRepository};
use crate::search::StudentSearch;

#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    /// Read of an id that does not exist
    #[error("id={0} Student not found!")]
    NotFound(i64),
    /// Update or delete of an id that does not exist
    #[error("given id is invalid.")]
    InvalidId(i64),
    #[error("firstName and LastName are already available")]
    DuplicateName,
    #[error("invalid student: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Validation(FieldErrors),
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for StudentError {
    fn from(err: DatabaseError) -> Self {
        match err {
            // The only unique key besides the primary key is the name pair
            DatabaseError::UniqueViolation(_) => StudentError::DuplicateName,
            other => StudentError::Database(other),
        }
    }
}

/// Student use cases on top of a [`StudentRepository`]
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn StudentRepository> {
        &self.repository
    }

    pub async fn get_all_students(&self) -> Result<Vec<StudentResponse>, StudentError> {
        let students = self.repository.find_all().await?;
        debug!("Loaded {} students", students.len());
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }

    pub async fn get_student_by_id(&self, id: i64) -> Result<StudentResponse, StudentError> {
        match self.repository.find_by_id(id).await? {
            Some(student) => Ok(student.into()),
            None => {
                warn!("Student {} not found", id);
                Err(StudentError::NotFound(id))
            }
        }
    }

    /// Creates a student and returns the generated id.
    ///
    /// The name pair lookup and the insert are separate statements; two
    /// concurrent saves of the same pair are settled by the store's unique
    /// constraint, which surfaces here as [`StudentError::DuplicateName`] too.
    pub async fn save_student(&self, request: StudentRequest) -> Result<i64, StudentError> {
        let fields = request.validate(Utc::now()).map_err(StudentError::Validation)?;

        let existing = self
            .repository
            .find_by_name_pair(&fields.first_name, &fields.last_name)
            .await?;
        if !existing.is_empty() {
            warn!("Rejected duplicate student {} {}", fields.first_name, fields.last_name);
            return Err(StudentError::DuplicateName);
        }

        let student = self.repository.save(None, fields).await?;
        info!("Created student {}", student.id);
        Ok(student.id)
    }

    /// Overwrites all mutable fields of an existing student
    pub async fn update_student(&self, id: i64, request: StudentRequest) -> Result<i64, StudentError> {
        let fields = request.validate(Utc::now()).map_err(StudentError::Validation)?;

        if self.repository.find_by_id(id).await?.is_none() {
            warn!("Update of unknown student {}", id);
            return Err(StudentError::InvalidId(id));
        }

        match self.repository.save(Some(id), fields).await {
            Ok(student) => {
                info!("Updated student {}", student.id);
                Ok(student.id)
            }
            // Deleted between the lookup and the write
            Err(DatabaseError::NotFound(_)) => Err(StudentError::InvalidId(id)),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn delete_student(&self, id: i64) -> Result<i64, StudentError> {
        if self.repository.find_by_id(id).await?.is_none() {
            warn!("Delete of unknown student {}", id);
            return Err(StudentError::InvalidId(id));
        }

        if !self.repository.delete_by_id(id).await? {
            return Err(StudentError::InvalidId(id));
        }
        info!("Deleted student {}", id);
        Ok(id)
    }

    pub async fn search_students(&self, search: &StudentSearch) -> Result<Vec<StudentResponse>, StudentError> {
        let students = self.repository.find_matching(search).await?;
        debug!("Search {:?} matched {} students", search.keywords(), students.len());
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }
}
