use crate::{
    models::MarkerResponse,
    notify::{observer::DashboardSnapshot, watcher::DashboardFeed},
    store::TimesheetStore,
};
use actix_web::{HttpResponse, Responder, web};

/// Current value of the update marker
///
/// Clients cache the value they last loaded data at and refetch whenever this
/// returns something larger.
#[utoipa::path(
    get,
    path = "/api/updates/marker",
    responses(
        (status = 200, description = "Marker value (Unix seconds, 0 if never updated)", body = MarkerResponse)
    ),
    tag = "Updates",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read_marker(store: web::Data<TimesheetStore>) -> impl Responder {
    HttpResponse::Ok().json(MarkerResponse {
        marker: store.marker().read(),
    })
}

/// Latest dashboard snapshot published by the background watcher
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Today's statuses and entries", body = DashboardSnapshot)
    ),
    tag = "Updates",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn dashboard(feed: web::Data<DashboardFeed>) -> impl Responder {
    let snapshot = feed.borrow().clone();
    HttpResponse::Ok().json(snapshot.as_ref())
}
