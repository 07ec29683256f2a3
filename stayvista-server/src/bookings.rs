use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json,
};
use stayvista_core::PrimaryKey;

use crate::{
    auth::{Host, Session},
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewBookingSchema, ValidatedJson},
    serialized::{Booking, ToSerialized},
    Router,
};

#[utoipa::path(
    post,
    path = "/booking",
    tag = "bookings",
    request_body = NewBookingSchema,
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Booking)
    )
)]
pub(crate) async fn create_booking(
    session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewBookingSchema>,
) -> ServerResult<Json<Booking>> {
    let booking = context
        .stayvista
        .bookings
        .book(session.email(), body.room_id, body.date, body.price)
        .await?;

    Ok(Json(booking.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/my-bookings",
    tag = "bookings",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<Booking>)
    )
)]
pub(crate) async fn my_bookings(
    session: Session,
    State(context): State<ServerContext>,
) -> ServerResult<Json<Vec<Booking>>> {
    let bookings = context.stayvista.bookings.for_guest(session.email()).await?;

    Ok(Json(bookings.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/manage-bookings",
    tag = "bookings",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<Booking>)
    )
)]
pub(crate) async fn manage_bookings(
    host: Host,
    State(context): State<ServerContext>,
) -> ServerResult<Json<Vec<Booking>>> {
    let bookings = context.stayvista.bookings.for_host(&host.0.email).await?;

    Ok(Json(bookings.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/booking/{id}",
    tag = "bookings",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, description = "Booking was cancelled and the room freed")
    )
)]
pub(crate) async fn cancel_booking(
    _session: Session,
    State(context): State<ServerContext>,
    Path(booking_id): Path<PrimaryKey>,
) -> ServerResult<()> {
    context.stayvista.bookings.cancel(booking_id).await?;

    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/booking", post(create_booking))
        .route("/booking/:id", delete(cancel_booking))
        .route("/my-bookings", get(my_bookings))
        .route("/manage-bookings", get(manage_bookings))
}
