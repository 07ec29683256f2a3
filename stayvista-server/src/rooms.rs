use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
    Json,
};
use stayvista_core::{NewRoom, PrimaryKey};

use crate::{
    auth::{Host, Session},
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewRoomSchema, RoomFilter, RoomStatusSchema, ValidatedJson},
    serialized::{Room, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    params(
        ("category" = Option<String>, Query, description = "Narrow the listing to one category")
    ),
    responses(
        (status = 200, body = Vec<Room>)
    )
)]
pub(crate) async fn list_rooms(
    State(context): State<ServerContext>,
    Query(filter): Query<RoomFilter>,
) -> ServerResult<Json<Vec<Room>>> {
    // Clients send the literal string "null" for an unset filter
    let category = filter
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "null");

    let rooms = context.stayvista.listings.list(category).await?;

    Ok(Json(rooms.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/room/{id}",
    tag = "rooms",
    responses(
        (status = 200, body = Room)
    )
)]
pub(crate) async fn room(
    State(context): State<ServerContext>,
    Path(room_id): Path<PrimaryKey>,
) -> ServerResult<Json<Room>> {
    let room = context.stayvista.listings.by_id(room_id).await?;

    Ok(Json(room.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/room",
    tag = "rooms",
    request_body = NewRoomSchema,
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Room)
    )
)]
pub(crate) async fn create_room(
    host: Host,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewRoomSchema>,
) -> ServerResult<Json<Room>> {
    let room = context
        .stayvista
        .listings
        .create(NewRoom {
            title: body.title,
            location: body.location,
            category: body.category,
            price_per_night: body.price_per_night,
            description: body.description,
            host_email: host.0.email,
        })
        .await?;

    Ok(Json(room.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/my-listings",
    tag = "rooms",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<Room>)
    )
)]
pub(crate) async fn my_listings(
    host: Host,
    State(context): State<ServerContext>,
) -> ServerResult<Json<Vec<Room>>> {
    let rooms = context.stayvista.listings.by_host(&host.0.email).await?;

    Ok(Json(rooms.to_serialized()))
}

#[utoipa::path(
    patch,
    path = "/room/status/{id}",
    tag = "rooms",
    request_body = RoomStatusSchema,
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Room)
    )
)]
pub(crate) async fn update_status(
    _session: Session,
    State(context): State<ServerContext>,
    Path(room_id): Path<PrimaryKey>,
    ValidatedJson(body): ValidatedJson<RoomStatusSchema>,
) -> ServerResult<Json<Room>> {
    let room = context
        .stayvista
        .listings
        .set_booked(room_id, body.booked)
        .await?;

    Ok(Json(room.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/room/{id}",
    tag = "rooms",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, description = "Room was removed")
    )
)]
pub(crate) async fn delete_room(
    _host: Host,
    State(context): State<ServerContext>,
    Path(room_id): Path<PrimaryKey>,
) -> ServerResult<()> {
    context.stayvista.listings.remove(room_id).await?;

    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/room", post(create_room))
        .route("/room/:id", get(room))
        .route("/room/:id", delete(delete_room))
        .route("/room/status/:id", patch(update_status))
        .route("/my-listings", get(my_listings))
}
