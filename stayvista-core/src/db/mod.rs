use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

mod data;
pub use data::*;

mod memory;
pub use memory::*;

mod pg;
pub use pg::*;

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// An unknown or internal error happened with the database
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    /// A resource already exists
    #[error("{resource} with {field} of value {value} already exists")]
    Conflict {
        /// The resource in question
        resource: &'static str,
        /// The field that is conflicting
        field: &'static str,
        /// The conflicting value
        value: String,
    },
    /// A resource in the database doesn't exist
    #[error("{resource}:{identifier} doesn't exist")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
}

/// Helper trait to reduce boilerplate
pub trait IntoDatabaseError {
    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError;
    fn any(self) -> DatabaseError;
}

/// Helper trait to reduce boilerplate
pub trait DatabaseResult {
    /// Turns the Result into a conflict error if it's Ok()
    fn conflict_or_ok(self, resource: &'static str, field: &'static str, value: &str)
        -> Result<()>;
}

impl<T> DatabaseResult for Result<T> {
    fn conflict_or_ok(
        self,
        resource: &'static str,
        field: &'static str,
        value: &str,
    ) -> Result<()> {
        match self {
            Ok(_) => Err(DatabaseError::Conflict {
                resource,
                field,
                value: value.to_string(),
            }),
            Err(e) => match e {
                DatabaseError::NotFound {
                    resource: _,
                    identifier: _,
                } => Ok(()),
                e => Err(e),
            },
        }
    }
}

/// Represents a type that can fetch stayvista data from a database
#[async_trait]
pub trait Database: Send + Sync {
    async fn user_by_email(&self, email: &str) -> Result<UserData>;
    async fn list_users(&self) -> Result<Vec<UserData>>;
    async fn count_users(&self) -> Result<i64>;
    async fn create_user(&self, new_user: NewUser) -> Result<UserData>;
    async fn update_user_role(&self, email: &str, role: UserRole) -> Result<UserData>;

    async fn room_by_id(&self, room_id: PrimaryKey) -> Result<RoomData>;
    async fn list_rooms(&self, category: Option<&str>) -> Result<Vec<RoomData>>;
    async fn rooms_by_host(&self, host_email: &str) -> Result<Vec<RoomData>>;
    async fn count_rooms(&self) -> Result<i64>;
    async fn count_rooms_by_host(&self, host_email: &str) -> Result<i64>;
    async fn create_room(&self, new_room: NewRoom) -> Result<RoomData>;
    async fn set_room_booked(&self, room_id: PrimaryKey, booked: bool) -> Result<RoomData>;
    async fn delete_room(&self, room_id: PrimaryKey) -> Result<()>;

    async fn booking_by_id(&self, booking_id: PrimaryKey) -> Result<BookingData>;
    async fn list_bookings(&self) -> Result<Vec<BookingData>>;
    async fn bookings_by_guest(&self, guest_email: &str) -> Result<Vec<BookingData>>;
    async fn bookings_by_host(&self, host_email: &str) -> Result<Vec<BookingData>>;
    async fn create_booking(&self, new_booking: NewBooking) -> Result<BookingData>;
    async fn delete_booking(&self, booking_id: PrimaryKey) -> Result<()>;
}

#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug)]
pub struct NewRoom {
    pub title: String,
    pub location: String,
    pub category: String,
    pub price_per_night: f64,
    pub description: String,
    /// The host offering the new room
    pub host_email: String,
}

#[derive(Debug)]
pub struct NewBooking {
    pub guest_email: String,
    pub host_email: String,
    pub room_id: PrimaryKey,
    pub date: NaiveDate,
    pub price: Option<f64>,
}
