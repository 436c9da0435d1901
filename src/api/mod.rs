pub mod attendance;
pub mod employee;
pub mod timesheet;
pub mod updates;
