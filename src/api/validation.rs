use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::date_format;
use super::dto::StudentRequest;
use crate::database::models::NewStudent;

/// Field name (as it appears on the wire) to violation message
pub type FieldErrors = BTreeMap<String, String>;

pub const FIRST_NAME_BLANK: &str = "firstName should not be null or blank";
pub const LAST_NAME_BLANK: &str = "lastName should not be null or blank";
pub const ADDRESS_BLANK: &str = "address should not be null or blank";
pub const DATE_OF_BIRTH_INVALID: &str = "dateOfBirth is invalid";

impl StudentRequest {
    /// Checks every field and collects all violations; on success yields the
    /// columns to store. `now` is the reference for "in the past".
    ///
    /// `dateOfBirth` may be absent (or blank), which stores no date; a value
    /// that is present must parse and lie strictly before `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<NewStudent, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = not_blank(&self.first_name, "firstName", FIRST_NAME_BLANK, &mut errors);
        let last_name = not_blank(&self.last_name, "lastName", LAST_NAME_BLANK, &mut errors);
        let date_of_birth = match self.date_of_birth.as_deref().map(str::trim) {
            None | Some("") => Some(None),
            Some(raw) => date_format::parse(raw).filter(|dob| *dob < now).map(Some),
        };
        if date_of_birth.is_none() {
            errors.insert("dateOfBirth".to_string(), DATE_OF_BIRTH_INVALID.to_string());
        }
        let address = not_blank(&self.address, "address", ADDRESS_BLANK, &mut errors);

        match (first_name, last_name, date_of_birth, address) {
            (Some(first_name), Some(last_name), Some(date_of_birth), Some(address)) if errors.is_empty() => {
                Ok(NewStudent { first_name, last_name, date_of_birth, address })
            }
            _ => Err(errors),
        }
    }
}

fn not_blank(value: &Option<String>, field: &str, message: &str, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.clone()),
        _ => {
            errors.insert(field.to_string(), message.to_string());
            None
        }
    }
}
