mod auth;
mod bookings;
mod db;
mod listings;
mod payments;
mod stats;

use std::sync::Arc;

pub use auth::*;
pub use bookings::*;
pub use db::*;
pub use listings::*;
pub use payments::*;
pub use stats::*;

/// Configuration the system needs beyond its database handle
#[derive(Debug, Clone)]
pub struct StayvistaConfig {
    /// Secret the session tokens are signed with
    pub token_secret: String,
    /// Secret key for the payment gateway
    pub stripe_secret_key: String,
}

/// The stayvista booking system, facilitating authentication, listings,
/// bookings, payments and reporting around a shared database handle.
pub struct Stayvista<Db> {
    database: Arc<Db>,

    pub auth: Auth<Db>,
    pub listings: Listings<Db>,
    pub bookings: Bookings<Db>,
    pub statistics: Statistics<Db>,
    pub payments: Payments,
}

impl<Db> Stayvista<Db>
where
    Db: Database,
{
    pub fn new(database: Db, config: StayvistaConfig) -> Self {
        let database = Arc::new(database);

        Self {
            auth: Auth::new(&database, &config.token_secret),
            listings: Listings::new(&database),
            bookings: Bookings::new(&database),
            statistics: Statistics::new(&database),
            payments: Payments::new(config.stripe_secret_key),
            database,
        }
    }

    /// Direct access to the underlying database handle
    pub fn db(&self) -> &Db {
        &self.database
    }
}
