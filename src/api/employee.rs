use crate::{
    auth::auth::AuthUser, error::AppError, model::employee::Employee, models::ChangePasswordReq,
    store::TimesheetStore,
};
use actix_web::{HttpResponse, web};
use serde_json::json;

/// List registered employees
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "All registered employees", body = [Employee])
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(store: web::Data<TimesheetStore>) -> Result<HttpResponse, AppError> {
    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "employee 'EMP-404' not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    store: web::Data<TimesheetStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = store.get_employee(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/api/employee/password",
    request_body = ChangePasswordReq,
    responses(
        (status = 200, description = "Password changed", body = Object, example = json!({
            "message": "Password changed"
        })),
        (status = 400, description = "Current password incorrect or new password blank")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn change_password(
    auth: AuthUser,
    store: web::Data<TimesheetStore>,
    body: web::Json<ChangePasswordReq>,
) -> Result<HttpResponse, AppError> {
    store
        .change_password(&auth.employee_id, &body.current_password, &body.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password changed"
    })))
}
