use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
};
use log::info;
use std::{
    env,
    net::{Ipv6Addr, SocketAddr},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod auth;
mod bookings;
mod context;
mod docs;
mod errors;
mod payments;
mod rooms;
mod schemas;
mod serialized;
mod stats;
mod users;

pub use context::ServerContext;

/// The default port the server will listen on.
pub const DEFAULT_PORT: u16 = 8000;

/// Origins allowed when no override is configured.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

pub type Router = axum::Router<ServerContext>;

/// Starts the stayvista server
pub async fn run_server(context: ServerContext) {
    let port = env::var("STAYVISTA_SERVER_PORT")
        .map(|x| x.parse::<u16>().expect("Port must be a number"))
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, port).into();

    // Cookies only travel cross-origin with credentials enabled, which
    // rules out wildcard origins
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let root_router = Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(rooms::router())
        .merge(bookings::router())
        .merge(payments::router())
        .merge(stats::router())
        .route("/", get(index))
        .route("/api.json", get(docs::docs))
        .layer(cors)
        .with_state(context);

    let listener = TcpListener::bind(&addr).await.expect("listens on address");

    info!("Listening on port {}", port);

    axum::serve(listener, root_router.into_make_service())
        .await
        .unwrap();
}

fn allowed_origins() -> Vec<HeaderValue> {
    env::var("STAYVISTA_CORS_ORIGINS")
        .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
        .split(',')
        .map(|origin| {
            origin
                .trim()
                .parse()
                .expect("origin is a valid header value")
        })
        .collect()
}

async fn index() -> &'static str {
    "Hello from StayVista Server.."
}
