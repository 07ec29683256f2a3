use axum::{
    extract::{Path, State},
    routing::{get, patch, put},
    Json,
};
use stayvista_core::{Database, LoginProfile};

use crate::{
    auth::Admin,
    context::ServerContext,
    errors::ServerResult,
    schemas::{UpdateRoleSchema, UpsertUserSchema, ValidatedJson},
    serialized::{ToSerialized, User},
    Router,
};

#[utoipa::path(
    put,
    path = "/user",
    tag = "users",
    request_body = UpsertUserSchema,
    responses(
        (status = 200, body = User)
    )
)]
pub(crate) async fn upsert_user(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<UpsertUserSchema>,
) -> ServerResult<Json<User>> {
    let user = context
        .stayvista
        .auth
        .upsert_user(LoginProfile {
            email: body.email,
            name: body.name,
            role: body.status,
        })
        .await?;

    Ok(Json(user.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "users",
    responses(
        (status = 200, body = User)
    )
)]
pub(crate) async fn user_by_email(
    State(context): State<ServerContext>,
    Path(email): Path<String>,
) -> ServerResult<Json<User>> {
    let user = context.stayvista.db().user_by_email(&email).await?;

    Ok(Json(user.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<User>)
    )
)]
pub(crate) async fn list_users(
    _admin: Admin,
    State(context): State<ServerContext>,
) -> ServerResult<Json<Vec<User>>> {
    let users = context.stayvista.db().list_users().await?;

    Ok(Json(users.to_serialized()))
}

#[utoipa::path(
    patch,
    path = "/users/update/{email}",
    tag = "users",
    request_body = UpdateRoleSchema,
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = User)
    )
)]
pub(crate) async fn update_role(
    _admin: Admin,
    State(context): State<ServerContext>,
    Path(email): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateRoleSchema>,
) -> ServerResult<Json<User>> {
    let user = context.stayvista.auth.set_role(&email, body.role).await?;

    Ok(Json(user.to_serialized()))
}

pub fn router() -> Router {
    Router::new()
        .route("/user", put(upsert_user))
        .route("/user/:email", get(user_by_email))
        .route("/users", get(list_users))
        .route("/users/update/:email", patch(update_role))
}
