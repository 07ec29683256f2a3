use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    routing::{get, post},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use stayvista_core::{Claims, UserData, UserRole};

use crate::{
    context::ServerContext,
    errors::{ServerError, ServerResult},
    schemas::{IssueTokenSchema, ValidatedJson},
    serialized::Success,
    Router,
};

/// Name of the cookie the session token travels in
pub const TOKEN_COOKIE: &str = "token";

/// An authenticated request, carrying the verified claims of the session
/// token. Extraction fails before any database access happens.
pub struct Session(Claims);

impl Session {
    /// The verified email of the caller
    pub fn email(&self) -> &str {
        self.0.email()
    }
}

/// A request whose caller holds the admin role
pub struct Admin(pub UserData);

/// A request whose caller holds the host role
pub struct Host(pub UserData);

#[async_trait]
impl FromRequestParts<ServerContext> for Session {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerContext,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar.get(TOKEN_COOKIE).ok_or(ServerError::Unauthenticated)?;

        let claims = state
            .stayvista
            .auth
            .verify_token(token.value())
            .map_err(|_| ServerError::Unauthenticated)?;

        Ok(Self(claims))
    }
}

#[async_trait]
impl FromRequestParts<ServerContext> for Admin {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerContext,
    ) -> Result<Self, Self::Rejection> {
        // The capability check only ever runs on an authenticated session
        let session = Session::from_request_parts(parts, state).await?;

        let user = state
            .stayvista
            .auth
            .authorize(session.email(), UserRole::Admin)
            .await?;

        Ok(Self(user))
    }
}

#[async_trait]
impl FromRequestParts<ServerContext> for Host {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerContext,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        let user = state
            .stayvista
            .auth
            .authorize(session.email(), UserRole::Host)
            .await?;

        Ok(Self(user))
    }
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(if secure {
            SameSite::None
        } else {
            SameSite::Strict
        })
        .build()
}

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "auth",
    request_body = IssueTokenSchema,
    responses(
        (status = 200, description = "Session token set as an http-only cookie", body = Success)
    )
)]
pub(crate) async fn issue_token(
    State(context): State<ServerContext>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<IssueTokenSchema>,
) -> ServerResult<(CookieJar, Json<Success>)> {
    let token = context.stayvista.auth.issue_token(&body.email)?;
    let jar = jar.add(session_cookie(token, context.secure_cookies));

    Ok((jar, Json(Success { success: true })))
}

#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = Success)
    )
)]
pub(crate) async fn logout(jar: CookieJar) -> (CookieJar, Json<Success>) {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/").build());

    (jar, Json(Success { success: true }))
}

pub fn router() -> Router {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
}
