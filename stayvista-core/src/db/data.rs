use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The type used for primary keys in the database.
pub type PrimaryKey = i32;

/// The access level of a user account.
///
/// `Requested` is a guest who has asked to become a host and is waiting for
/// an admin to approve. It grants no capabilities on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    Host,
    Admin,
    Requested,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Guest => "guest",
            UserRole::Host => "host",
            UserRole::Admin => "admin",
            UserRole::Requested => "requested",
        }
    }
}

/// A stayvista account, created on first login
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserData {
    pub id: PrimaryKey,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// When the account was first stored
    pub registered_at: DateTime<Utc>,
}

/// A rentable room listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomData {
    pub id: PrimaryKey,
    pub title: String,
    pub location: String,
    pub category: String,
    pub price_per_night: f64,
    pub description: String,
    /// The host offering this room
    pub host_email: String,
    pub booked: bool,
}

/// A confirmed reservation of a room for a night
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingData {
    pub id: PrimaryKey,
    pub guest_email: String,
    pub host_email: String,
    pub room_id: PrimaryKey,
    pub date: NaiveDate,
    /// The agreed price. Legacy records may lack one, which counts as 0
    /// towards revenue.
    pub price: Option<f64>,
}
