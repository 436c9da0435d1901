use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted submission. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimesheetEntry {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "Payroll migration")]
    pub project_name: String,

    #[schema(example = "Mapped legacy salary tables")]
    pub task_description: String,

    #[schema(example = 4.5)]
    pub hours_worked: f64,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub submission_date: NaiveDate,

    #[schema(example = "09:12:44", value_type = String)]
    pub submission_time: NaiveTime,
}

/// Today's entry joined with the submitter's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimesheetRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub entry: TimesheetEntry,

    #[schema(example = "John Doe")]
    pub employee_name: String,
}

/// An entry as handed to the store, before it has an id.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub employee_id: String,
    pub project_name: String,
    pub task_description: String,
    pub hours_worked: f64,
    pub submission_date: NaiveDate,
    pub submission_time: NaiveTime,
}
