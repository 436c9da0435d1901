use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, ToSchema,
)]
pub enum AttendanceStatus {
    #[strum(serialize = "Absent")]
    #[serde(rename = "Absent")]
    Absent,

    #[strum(serialize = "Present")]
    #[serde(rename = "Present")]
    Present,

    #[strum(serialize = "Present (Late)")]
    #[serde(rename = "Present (Late)")]
    PresentLate,

    #[strum(serialize = "Half-day")]
    #[serde(rename = "Half-day")]
    HalfDay,
}

/// One employee's derived attendance for a date. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAttendance {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(example = "09:12:44", value_type = Option<String>, nullable = true)]
    pub first_submission: Option<NaiveTime>,

    #[schema(example = 7.5)]
    pub hours_worked: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_the_wire_label() {
        for status in [
            AttendanceStatus::Absent,
            AttendanceStatus::Present,
            AttendanceStatus::PresentLate,
            AttendanceStatus::HalfDay,
        ] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire.as_str(), Some(status.to_string().as_str()));
        }
        assert_eq!(AttendanceStatus::PresentLate.to_string(), "Present (Late)");
    }
}
