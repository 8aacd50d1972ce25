use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Table backing the student records
pub const STUDENTS_TABLE: &str = "students";

/// Unique constraint on the name pair, see `migrations/`
pub const NAME_PAIR_CONSTRAINT: &str = "uq_students_first_name_last_name";

/// A stored student row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub address: String,
}

/// The mutable columns of a student, i.e. everything but the generated id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub address: String,
}

impl Student {
    pub fn from_new(id: i64, fields: NewStudent) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            date_of_birth: fields.date_of_birth,
            address: fields.address,
        }
    }

    pub fn has_name_pair(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// Overwrites all four mutable fields, keeping the id
    pub fn apply(&mut self, fields: NewStudent) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.date_of_birth = fields.date_of_birth;
        self.address = fields.address;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields(first: &str, last: &str) -> NewStudent {
        NewStudent {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: Some(Utc.with_ymd_and_hms(2000, 1, 11, 0, 0, 0).unwrap()),
            address: "Colombo".to_string(),
        }
    }

    #[test]
    fn apply_keeps_id() {
        let mut student = Student::from_new(4, fields("Anuki", "Alwis"));
        student.apply(fields("Tim", "Thomsan"));
        assert_eq!(student.id, 4);
        assert!(student.has_name_pair("Tim", "Thomsan"));
        assert!(!student.has_name_pair("Anuki", "Alwis"));
    }
}
