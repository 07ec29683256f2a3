use axum::{extract::State, routing::get, Json};

use crate::{
    auth::{Admin, Host},
    context::ServerContext,
    errors::ServerResult,
    serialized::{AdminStats, HostStats, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/admin-stat",
    tag = "stats",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = AdminStats)
    )
)]
pub(crate) async fn admin_stat(
    _admin: Admin,
    State(context): State<ServerContext>,
) -> ServerResult<Json<AdminStats>> {
    let report = context.stayvista.statistics.admin_report().await?;

    Ok(Json(report.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/host-stat",
    tag = "stats",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = HostStats)
    )
)]
pub(crate) async fn host_stat(
    host: Host,
    State(context): State<ServerContext>,
) -> ServerResult<Json<HostStats>> {
    // Scoped to the caller's verified email, never a request parameter
    let report = context
        .stayvista
        .statistics
        .host_report(&host.0.email)
        .await?;

    Ok(Json(report.to_serialized()))
}

pub fn router() -> Router {
    Router::new()
        .route("/admin-stat", get(admin_stat))
        .route("/host-stat", get(host_stat))
}
