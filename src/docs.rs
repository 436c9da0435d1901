use crate::model::{
    attendance::{AttendanceStatus, DailyAttendance},
    employee::Employee,
    timesheet::{TimesheetEntry, TimesheetRow},
};
use crate::models::{ChangePasswordReq, LoginReqDto, LoginResponse, MarkerResponse, RegisterReq, SubmitEntryReq};
use crate::notify::observer::DashboardSnapshot;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timesheet Attendance API",
        version = "1.0.0",
        description = r#"
## Timesheet & Attendance

Employees submit work-hour entries; each employee's daily attendance is derived
from the time of their **first** submission of the day.

### 🔹 Attendance rules
- **Present**: first entry between 08:30:00 and 10:00:00
- **Half-day**: first entry at or after 13:00:00
- **Present (Late)**: any other first entry
- **Absent**: no entry today

### 🔄 Change notification
Every successful mutation advances a monotonic **update marker**. Dashboards poll
`/api/updates/marker` and refetch only when it grows, or read the server-side
snapshot at `/api/dashboard`, which a background watcher keeps current.

### 🔐 Security
Everything under `/api` requires a **JWT Bearer** token from `/auth/login`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::change_password,

        crate::api::timesheet::submit_entry,
        crate::api::timesheet::entries_today,
        crate::api::timesheet::employee_entries_today,

        crate::api::attendance::statuses_today,
        crate::api::attendance::employee_status_today,

        crate::api::updates::read_marker,
        crate::api::updates::dashboard
    ),
    components(
        schemas(
            Employee,
            RegisterReq,
            LoginReqDto,
            LoginResponse,
            ChangePasswordReq,
            SubmitEntryReq,
            TimesheetEntry,
            TimesheetRow,
            AttendanceStatus,
            DailyAttendance,
            DashboardSnapshot,
            MarkerResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Employee", description = "Employee directory and credentials"),
        (name = "Timesheet", description = "Work-hour submissions"),
        (name = "Attendance", description = "Derived daily attendance"),
        (name = "Updates", description = "Change notification for dashboards"),
    )
)]
pub struct ApiDoc;

/// The document with the protected routes moved under `api_prefix`, which is
/// where `routes::configure` mounts them.
pub fn openapi_for(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let prefix = api_prefix.trim_end_matches('/');
    let mut doc = ApiDoc::openapi();

    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| match path.strip_prefix("/api/") {
            Some(rest) => (format!("{}/{}", prefix, rest), item),
            None => (path, item),
        })
        .collect();
    doc
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/register",
            "/auth/login",
            "/api/timesheet",
            "/api/attendance/today",
            "/api/updates/marker",
            "/api/dashboard",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn protected_paths_follow_the_configured_prefix() {
        let doc = openapi_for("/v2/");
        assert!(doc.paths.paths.contains_key("/v2/timesheet"));
        assert!(doc.paths.paths.contains_key("/v2/attendance/today/{employee_id}"));
        assert!(doc.paths.paths.contains_key("/auth/login"));
        assert!(!doc.paths.paths.keys().any(|path| path.starts_with("/api/")));
        assert_eq!(doc.paths.paths.len(), ApiDoc::openapi().paths.paths.len());
    }
}
