//! Person record types
//!
//! A record's `id` is a view over its position in the stored sequence:
//! the record at index `i` has `id == i + 1`. Only the five text fields
//! are persisted, so deleting a record shifts the ids of every record
//! after it on the next load.

use serde::{Deserialize, Serialize};

/// The five persisted text fields of a person record.
///
/// Salary and phone are kept verbatim as text; they are never parsed as
/// numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub salary: String,
    pub phone: String,
}

impl RecordFields {
    /// Create a new set of record fields
    pub fn new(
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        salary: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
            salary: salary.into(),
            phone: phone.into(),
        }
    }
}

/// A person record with its positional id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Positional id, `index + 1`
    pub id: usize,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl Record {
    /// Build the record stored at the given 0-based position
    pub fn at_position(index: usize, fields: RecordFields) -> Self {
        Self {
            id: index + 1,
            fields,
        }
    }

    /// Returns the record's email
    pub fn email(&self) -> &str {
        &self.fields.email
    }
}

/// Assign positional ids 1..N to a stored sequence.
pub fn number_records(rows: Vec<RecordFields>) -> Vec<Record> {
    rows.into_iter()
        .enumerate()
        .map(|(index, fields)| Record::at_position(index, fields))
        .collect()
}
