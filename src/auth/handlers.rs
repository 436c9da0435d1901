use crate::{
    auth::jwt::generate_access_token,
    config::Config,
    error::AppError,
    model::employee::Employee,
    models::{LoginReqDto, LoginResponse, RegisterReq},
    store::TimesheetStore,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, error, info, instrument};

/// Register an employee
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Employee registered", body = Employee),
        (status = 400, description = "Blank employee id, name or password", body = Object, example = json!({
            "message": "name must not be blank"
        })),
        (status = 409, description = "Employee id already taken", body = Object, example = json!({
            "message": "employee 'EMP-001' is already registered"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_register",
    skip(store, req),
    fields(employee_id = %req.employee_id)
)]
pub async fn register(
    req: web::Json<RegisterReq>,
    store: web::Data<TimesheetStore>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .register_employee(&req.employee_id, &req.name, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(employee))
}

/// Exchange employee credentials for an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(employee_id = %user.employee_id)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<TimesheetStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if user.employee_id.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty employee id or password");
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Employee id and password required"
        })));
    }

    debug!("Verifying credentials");

    if !store
        .verify_credentials(&user.employee_id, &user.password)
        .await?
    {
        info!("Invalid credentials");
        return Ok(HttpResponse::Unauthorized().json(json!({
            "message": "Invalid credentials"
        })));
    }

    let employee = store.get_employee(&user.employee_id).await?;

    let access_token = generate_access_token(
        &employee.employee_id,
        &employee.name,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign access token");
        AppError::Credential(e.to_string())
    })?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}
