use crate::{
    api::{attendance, employee, timesheet, updates},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // only fails for a zero period or burst, both clamped above
        .expect("valid rate limiter config");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter)
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter)
                    .route(web::post().to(handlers::register)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/employee")
                    // /employee
                    .service(web::resource("").route(web::get().to(employee::list_employees)))
                    // /employee/password
                    .service(
                        web::resource("/password").route(web::put().to(employee::change_password)),
                    )
                    // /employee/{id}
                    .service(web::resource("/{id}").route(web::get().to(employee::get_employee))),
            )
            .service(
                web::scope("/timesheet")
                    // /timesheet
                    .service(web::resource("").route(web::post().to(timesheet::submit_entry)))
                    // /timesheet/today
                    .service(web::resource("/today").route(web::get().to(timesheet::entries_today)))
                    // /timesheet/today/{employee_id}
                    .service(
                        web::resource("/today/{employee_id}")
                            .route(web::get().to(timesheet::employee_entries_today)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/today
                    .service(
                        web::resource("/today").route(web::get().to(attendance::statuses_today)),
                    )
                    // /attendance/today/{employee_id}
                    .service(
                        web::resource("/today/{employee_id}")
                            .route(web::get().to(attendance::employee_status_today)),
                    ),
            )
            .service(web::resource("/updates/marker").route(web::get().to(updates::read_marker)))
            .service(web::resource("/dashboard").route(web::get().to(updates::dashboard))),
    );
}
