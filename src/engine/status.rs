use chrono::NaiveDate;

use crate::engine::policy::classify_first_submission;
use crate::model::{
    attendance::{AttendanceStatus, DailyAttendance},
    employee::Employee,
    timesheet::TimesheetEntry,
};

/// The entry that decides an employee's status on `date`: earliest
/// `submission_time`, lowest `id` among equal times.
pub fn first_entry<'a>(
    employee_id: &str,
    date: NaiveDate,
    entries: &'a [TimesheetEntry],
) -> Option<&'a TimesheetEntry> {
    entries
        .iter()
        .filter(|e| e.employee_id == employee_id && e.submission_date == date)
        .min_by_key(|e| (e.submission_time, e.id))
}

pub fn compute_status(
    employee_id: &str,
    date: NaiveDate,
    entries: &[TimesheetEntry],
) -> AttendanceStatus {
    match first_entry(employee_id, date, entries) {
        Some(first) => classify_first_submission(first.submission_time),
        None => AttendanceStatus::Absent,
    }
}

pub fn daily_attendance(
    employee: &Employee,
    date: NaiveDate,
    entries: &[TimesheetEntry],
) -> DailyAttendance {
    let first = first_entry(&employee.employee_id, date, entries);

    let hours_worked = entries
        .iter()
        .filter(|e| e.employee_id == employee.employee_id && e.submission_date == date)
        .map(|e| e.hours_worked)
        .sum();

    DailyAttendance {
        employee_id: employee.employee_id.clone(),
        name: employee.name.clone(),
        date,
        status: first
            .map(|e| classify_first_submission(e.submission_time))
            .unwrap_or(AttendanceStatus::Absent),
        first_submission: first.map(|e| e.submission_time),
        hours_worked,
    }
}

/// One row per registered employee, in registry order. Employees without
/// entries on `date` are reported `Absent`, never dropped.
pub fn compute_all_statuses(
    employees: &[Employee],
    date: NaiveDate,
    entries: &[TimesheetEntry],
) -> Vec<DailyAttendance> {
    employees
        .iter()
        .map(|employee| daily_attendance(employee, date, entries))
        .collect()
}
