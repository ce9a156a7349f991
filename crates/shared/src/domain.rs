use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(EmployeeId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

/// A persisted employee record. The server assigns the id; clients hold
/// these only as a read-through cache invalidated by refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub salary: f64,
    pub department: String,
    pub role: String,
    pub date_of_joining: NaiveDate,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

/// A not-yet-persisted or being-edited employee. Salary and joining date
/// are optional so an unfilled form field is representable; the validator
/// decides whether the draft may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub salary: Option<f64>,
    pub department: String,
    pub role: String,
    pub date_of_joining: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl EmployeeDraft {
    /// Pre-populates a draft from an existing record for editing.
    pub fn from_record(record: &Employee) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            salary: Some(record.salary),
            department: record.department.clone(),
            role: record.role.clone(),
            date_of_joining: Some(record.date_of_joining),
            date_of_birth: record.date_of_birth,
            status: record.status,
        }
    }
}
