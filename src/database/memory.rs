use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::student::NAME_PAIR_CONSTRAINT;
use crate::database::models::{NewStudent, Student};
use crate::database::repository::StudentRepository;
use crate::search::StudentSearch;

/// Process-local student table, used by tests and `--memory` runs.
///
/// Ids are assigned from a counter starting at 1 and never reused. The name
/// pair uniqueness check happens under the write lock, mirroring the unique
/// constraint of the SQL table.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    table: RwLock<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

impl MemoryTable {
    fn name_pair_taken(&self, fields: &NewStudent, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|s| Some(s.id) != except && s.has_name_pair(&fields.first_name, &fields.last_name))
    }
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_name_pair(&self, first_name: &str, last_name: &str) -> Result<Vec<Student>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|s| s.has_name_pair(first_name, last_name))
            .cloned()
            .collect())
    }

    async fn find_matching(&self, search: &StudentSearch) -> Result<Vec<Student>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|s| search.matches(s)).cloned().collect())
    }

    async fn save(&self, id: Option<i64>, fields: NewStudent) -> Result<Student, DatabaseError> {
        let mut table = self.table.write().await;

        if table.name_pair_taken(&fields, id) {
            return Err(DatabaseError::UniqueViolation(NAME_PAIR_CONSTRAINT.to_string()));
        }

        match id {
            None => {
                table.last_id += 1;
                let student = Student::from_new(table.last_id, fields);
                table.rows.insert(student.id, student.clone());
                Ok(student)
            }
            Some(id) => {
                let existing = table
                    .rows
                    .get_mut(&id)
                    .ok_or_else(|| DatabaseError::NotFound(format!("student {}", id)))?;
                existing.apply(fields);
                Ok(existing.clone())
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
