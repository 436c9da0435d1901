use crate::{
    auth::auth::AuthUser,
    config::Config,
    engine::policy::submission_window_open,
    error::{AppError, ValidationError},
    model::timesheet::{NewEntry, TimesheetEntry, TimesheetRow},
    models::SubmitEntryReq,
    store::TimesheetStore,
    utils::clock::SharedClock,
};
use actix_web::{HttpResponse, web};
use tracing::info;

/// Submit a timesheet entry for the caller
#[utoipa::path(
    post,
    path = "/api/timesheet",
    request_body = SubmitEntryReq,
    responses(
        (status = 201, description = "Entry recorded", body = TimesheetEntry),
        (status = 400, description = "Invalid entry or submissions closed", body = Object, example = json!({
            "message": "hours_worked must be a positive number, got 0"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Store unavailable")
    ),
    tag = "Timesheet",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_entry(
    auth: AuthUser,
    store: web::Data<TimesheetStore>,
    clock: web::Data<SharedClock>,
    config: web::Data<Config>,
    body: web::Json<SubmitEntryReq>,
) -> Result<HttpResponse, AppError> {
    let now = clock.now();

    if config.enforce_submission_windows && !submission_window_open(now.time()) {
        info!(employee_id = %auth.employee_id, time = %now.time(), "Submission outside window");
        return Err(ValidationError::OutsideSubmissionWindow(now.time()).into());
    }

    let body = body.into_inner();
    let entry = store
        .append_entry(NewEntry {
            employee_id: auth.employee_id,
            project_name: body.project_name,
            task_description: body.task_description,
            hours_worked: body.hours_worked,
            submission_date: now.date(),
            submission_time: now.time(),
        })
        .await?;

    Ok(HttpResponse::Created().json(entry))
}

/// Today's entries, newest first
#[utoipa::path(
    get,
    path = "/api/timesheet/today",
    responses(
        (status = 200, description = "Entries submitted today", body = [TimesheetRow])
    ),
    tag = "Timesheet",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn entries_today(
    store: web::Data<TimesheetStore>,
    clock: web::Data<SharedClock>,
) -> Result<HttpResponse, AppError> {
    let rows = store.entries_for_date(clock.today()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// One employee's entries today, oldest first
#[utoipa::path(
    get,
    path = "/api/timesheet/today/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "The employee's entries today", body = [TimesheetRow]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Timesheet",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn employee_entries_today(
    store: web::Data<TimesheetStore>,
    clock: web::Data<SharedClock>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let rows = store
        .entries_for_employee(&path.into_inner(), clock.today())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}
