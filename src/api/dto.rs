use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::database::models::Student;

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Fields are optional here so that a missing field is reported by
/// validation (with its own message) instead of failing deserialization.
/// Numbers and booleans are taken as their text, so `"firstName": 5` is the
/// name `"5"` and a numeric `dateOfBirth` is epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub address: Option<String>,
}

/// Accepts any JSON scalar as text; arrays and objects are rejected
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!("expected a string, found {}", other))),
    }
}

/// A stored student as returned by every read endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, with = "super::date_format::option")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub address: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            date_of_birth: student.date_of_birth,
            address: student.address,
        }
    }
}
