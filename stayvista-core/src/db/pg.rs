use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, query, query_as, query_scalar, Error as SqlxError, PgPool};

use crate::{
    BookingData, Database, DatabaseError, DatabaseResult, IntoDatabaseError, NewBooking, NewRoom,
    NewUser, PrimaryKey, Result, RoomData, UserData, UserRole,
};

/// A postgres database implementation for stayvista.
///
/// Expected tables:
/// - users (id, email unique, name, role text, registered_at timestamptz)
/// - rooms (id, title, location, category, price_per_night, description,
///   host_email, booked)
/// - bookings (id, guest_email, host_email, room_id, date, price nullable)
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub async fn new(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| DatabaseError::Internal(Box::new(e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn user_by_email(&self, email: &str) -> Result<UserData> {
        query_as::<_, UserData>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("user", "email"))
    }

    async fn list_users(&self) -> Result<Vec<UserData>> {
        query_as::<_, UserData>("SELECT * FROM users ORDER BY registered_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn count_users(&self) -> Result<i64> {
        query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserData> {
        self.user_by_email(&new_user.email)
            .await
            .conflict_or_ok("user", "email", &new_user.email)?;

        query_as::<_, UserData>(
            "INSERT INTO users (email, name, role, registered_at)
             VALUES ($1, $2, $3, now()) RETURNING *",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn update_user_role(&self, email: &str, role: UserRole) -> Result<UserData> {
        // Ensure user exists
        let _ = self.user_by_email(email).await?;

        query_as::<_, UserData>(
            "UPDATE users SET role = $1, registered_at = now() WHERE email = $2 RETURNING *",
        )
        .bind(role)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn room_by_id(&self, room_id: PrimaryKey) -> Result<RoomData> {
        query_as::<_, RoomData>("SELECT * FROM rooms WHERE id = $1")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("room", "id"))
    }

    async fn list_rooms(&self, category: Option<&str>) -> Result<Vec<RoomData>> {
        let rooms = match category {
            Some(category) => {
                query_as::<_, RoomData>("SELECT * FROM rooms WHERE category = $1")
                    .bind(category)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                query_as::<_, RoomData>("SELECT * FROM rooms")
                    .fetch_all(&self.pool)
                    .await
            }
        };

        rooms.map_err(|e| e.any())
    }

    async fn rooms_by_host(&self, host_email: &str) -> Result<Vec<RoomData>> {
        query_as::<_, RoomData>("SELECT * FROM rooms WHERE host_email = $1")
            .bind(host_email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn count_rooms(&self) -> Result<i64> {
        query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn count_rooms_by_host(&self, host_email: &str) -> Result<i64> {
        query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms WHERE host_email = $1")
            .bind(host_email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_room(&self, new_room: NewRoom) -> Result<RoomData> {
        query_as::<_, RoomData>(
            "INSERT INTO rooms (title, location, category, price_per_night, description, host_email, booked)
             VALUES ($1, $2, $3, $4, $5, $6, false) RETURNING *",
        )
        .bind(&new_room.title)
        .bind(&new_room.location)
        .bind(&new_room.category)
        .bind(new_room.price_per_night)
        .bind(&new_room.description)
        .bind(&new_room.host_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn set_room_booked(&self, room_id: PrimaryKey, booked: bool) -> Result<RoomData> {
        // Ensure room exists
        let _ = self.room_by_id(room_id).await?;

        query_as::<_, RoomData>("UPDATE rooms SET booked = $1 WHERE id = $2 RETURNING *")
            .bind(booked)
            .bind(room_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn delete_room(&self, room_id: PrimaryKey) -> Result<()> {
        // Ensure room exists
        let _ = self.room_by_id(room_id).await?;

        query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.any())
            .map(|_| ())
    }

    async fn booking_by_id(&self, booking_id: PrimaryKey) -> Result<BookingData> {
        query_as::<_, BookingData>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("booking", "id"))
    }

    async fn list_bookings(&self) -> Result<Vec<BookingData>> {
        query_as::<_, BookingData>("SELECT * FROM bookings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn bookings_by_guest(&self, guest_email: &str) -> Result<Vec<BookingData>> {
        query_as::<_, BookingData>("SELECT * FROM bookings WHERE guest_email = $1")
            .bind(guest_email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn bookings_by_host(&self, host_email: &str) -> Result<Vec<BookingData>> {
        query_as::<_, BookingData>("SELECT * FROM bookings WHERE host_email = $1")
            .bind(host_email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_booking(&self, new_booking: NewBooking) -> Result<BookingData> {
        query_as::<_, BookingData>(
            "INSERT INTO bookings (guest_email, host_email, room_id, date, price)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new_booking.guest_email)
        .bind(&new_booking.host_email)
        .bind(new_booking.room_id)
        .bind(new_booking.date)
        .bind(new_booking.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn delete_booking(&self, booking_id: PrimaryKey) -> Result<()> {
        // Ensure booking exists
        let _ = self.booking_by_id(booking_id).await?;

        query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.any())
            .map(|_| ())
    }
}

impl IntoDatabaseError for SqlxError {
    fn any(self) -> DatabaseError {
        DatabaseError::Internal(Box::new(self))
    }

    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError {
        match self {
            SqlxError::RowNotFound => DatabaseError::NotFound {
                resource,
                identifier,
            },
            e => Self::any(e),
        }
    }
}
