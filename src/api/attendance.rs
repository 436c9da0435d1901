use crate::{
    engine::status::{compute_all_statuses, daily_attendance},
    error::AppError,
    model::attendance::DailyAttendance,
    store::TimesheetStore,
    utils::clock::SharedClock,
};
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Attendance status of every registered employee today
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "One row per registered employee", body = [DailyAttendance]),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Store unavailable")
    ),
    tag = "Attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn statuses_today(
    store: web::Data<TimesheetStore>,
    clock: web::Data<SharedClock>,
) -> Result<HttpResponse, AppError> {
    let today = clock.today();
    let day = store.day_snapshot(today).await?;
    let statuses = compute_all_statuses(&day.employees, today, &day.entries());

    Ok(HttpResponse::Ok().json(statuses))
}

/// Attendance status of one employee today
#[utoipa::path(
    get,
    path = "/api/attendance/today/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "The employee's status", body = DailyAttendance),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "employee 'EMP-404' not found"
        }))
    ),
    tag = "Attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn employee_status_today(
    store: web::Data<TimesheetStore>,
    clock: web::Data<SharedClock>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    let today = clock.today();

    let (employee, rows) = store.employee_day(&employee_id, today).await?;
    let entries: Vec<_> = rows.into_iter().map(|row| row.entry).collect();

    let attendance = daily_attendance(&employee, today, &entries);
    debug!(employee_id = %attendance.employee_id, status = %attendance.status, "Status computed");

    Ok(HttpResponse::Ok().json(attendance))
}
