use std::sync::Arc;

use axum::extract::FromRef;
use stayvista_core::{PgDatabase, Stayvista};

#[derive(Clone, FromRef)]
pub struct ServerContext {
    pub stayvista: Arc<Stayvista<PgDatabase>>,
    /// Whether session cookies are marked Secure/SameSite=None, for
    /// cross-site deployments behind https
    pub secure_cookies: bool,
}
