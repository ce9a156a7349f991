use serde::{Deserialize, Serialize};

use crate::domain::Employee;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body shape the backend uses for rejected requests. Older endpoints
/// populate `error` instead of `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub department_name: String,
    pub employee_count: i64,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub employee_name: String,
    pub event_type: String,
    pub date: String,
    pub days_until: i32,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: i64,
    pub new_hires_this_month: i64,
    #[serde(default)]
    pub department_stats: Vec<DepartmentStats>,
    #[serde(default)]
    pub recent_hires: Vec<Employee>,
    #[serde(default)]
    pub upcoming_anniversaries: Vec<UpcomingEvent>,
    #[serde(default)]
    pub upcoming_birthdays: Vec<UpcomingEvent>,
}
