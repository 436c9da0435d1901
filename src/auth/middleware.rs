use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::{Value, json};
use tracing::debug;

fn reject(req: ServiceRequest, body: Value) -> ServiceResponse<BoxBody> {
    let resp = HttpResponse::Unauthorized().json(body);
    req.into_response(resp.map_into_boxed_body())
}

fn bearer_token(req: &ServiceRequest) -> Result<&str, &'static str> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header encoding")?;

    header
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must start with Bearer")
}

/// Resolves the bearer token to the employee it was issued to and stores
/// them as an [`AuthUser`] in the request extensions.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let secret = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?
        .jwt_secret
        .clone();

    let verified = bearer_token(&req)
        .map_err(|msg| json!({ "error": msg }))
        .and_then(|token| {
            verify_token(token, &secret)
                .map_err(|e| json!({ "error": "Invalid or expired token", "details": e }))
        });

    let claims = match verified {
        Ok(claims) => claims,
        Err(body) => {
            debug!(path = %req.path(), "Rejected unauthenticated request");
            return Ok(reject(req, body));
        }
    };

    req.extensions_mut().insert(AuthUser {
        employee_id: claims.sub,
        name: claims.name,
    });

    next.call(req).await
}
