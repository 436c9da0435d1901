use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterReq {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordReq {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct SubmitEntryReq {
    #[schema(example = "Payroll migration")]
    pub project_name: String,
    #[schema(example = "Mapped legacy salary tables")]
    pub task_description: String,
    #[schema(example = 4.5)]
    pub hours_worked: f64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MarkerResponse {
    #[schema(example = 1767600764.25)]
    pub marker: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// employee id
    pub sub: String,
    pub name: String,
    pub exp: usize,
    pub jti: String,
}
