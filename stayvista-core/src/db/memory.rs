use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    BookingData, Database, DatabaseError, DatabaseResult, NewBooking, NewRoom, NewUser, PrimaryKey,
    Result, RoomData, UserData, UserRole,
};

/// An in-memory database implementation, used by tests and local development
/// where a postgres instance is not available.
#[derive(Default)]
pub struct MemoryDatabase {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: PrimaryKey,
    users: Vec<UserData>,
    rooms: Vec<RoomData>,
    bookings: Vec<BookingData>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn next_id(&mut self) -> PrimaryKey {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn user_by_email(&self, email: &str) -> Result<UserData> {
        self.inner
            .read()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(DatabaseError::NotFound {
                resource: "user",
                identifier: "email",
            })
    }

    async fn list_users(&self) -> Result<Vec<UserData>> {
        Ok(self.inner.read().users.clone())
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.inner.read().users.len() as i64)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserData> {
        self.user_by_email(&new_user.email)
            .await
            .conflict_or_ok("user", "email", &new_user.email)?;

        let mut inner = self.inner.write();
        let user = UserData {
            id: inner.next_id(),
            email: new_user.email,
            name: new_user.name,
            role: new_user.role,
            registered_at: Utc::now(),
        };

        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update_user_role(&self, email: &str, role: UserRole) -> Result<UserData> {
        let mut inner = self.inner.write();
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(DatabaseError::NotFound {
                resource: "user",
                identifier: "email",
            })?;

        user.role = role;
        user.registered_at = Utc::now();
        Ok(user.clone())
    }

    async fn room_by_id(&self, room_id: PrimaryKey) -> Result<RoomData> {
        self.inner
            .read()
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .cloned()
            .ok_or(DatabaseError::NotFound {
                resource: "room",
                identifier: "id",
            })
    }

    async fn list_rooms(&self, category: Option<&str>) -> Result<Vec<RoomData>> {
        let rooms = self
            .inner
            .read()
            .rooms
            .iter()
            .filter(|r| category.map(|c| r.category == c).unwrap_or(true))
            .cloned()
            .collect();

        Ok(rooms)
    }

    async fn rooms_by_host(&self, host_email: &str) -> Result<Vec<RoomData>> {
        let rooms = self
            .inner
            .read()
            .rooms
            .iter()
            .filter(|r| r.host_email == host_email)
            .cloned()
            .collect();

        Ok(rooms)
    }

    async fn count_rooms(&self) -> Result<i64> {
        Ok(self.inner.read().rooms.len() as i64)
    }

    async fn count_rooms_by_host(&self, host_email: &str) -> Result<i64> {
        Ok(self.rooms_by_host(host_email).await?.len() as i64)
    }

    async fn create_room(&self, new_room: NewRoom) -> Result<RoomData> {
        let mut inner = self.inner.write();
        let room = RoomData {
            id: inner.next_id(),
            title: new_room.title,
            location: new_room.location,
            category: new_room.category,
            price_per_night: new_room.price_per_night,
            description: new_room.description,
            host_email: new_room.host_email,
            booked: false,
        };

        inner.rooms.push(room.clone());
        Ok(room)
    }

    async fn set_room_booked(&self, room_id: PrimaryKey, booked: bool) -> Result<RoomData> {
        let mut inner = self.inner.write();
        let room = inner
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or(DatabaseError::NotFound {
                resource: "room",
                identifier: "id",
            })?;

        room.booked = booked;
        Ok(room.clone())
    }

    async fn delete_room(&self, room_id: PrimaryKey) -> Result<()> {
        // Ensure room exists
        let _ = self.room_by_id(room_id).await?;

        self.inner.write().rooms.retain(|r| r.id != room_id);
        Ok(())
    }

    async fn booking_by_id(&self, booking_id: PrimaryKey) -> Result<BookingData> {
        self.inner
            .read()
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
            .ok_or(DatabaseError::NotFound {
                resource: "booking",
                identifier: "id",
            })
    }

    async fn list_bookings(&self) -> Result<Vec<BookingData>> {
        Ok(self.inner.read().bookings.clone())
    }

    async fn bookings_by_guest(&self, guest_email: &str) -> Result<Vec<BookingData>> {
        let bookings = self
            .inner
            .read()
            .bookings
            .iter()
            .filter(|b| b.guest_email == guest_email)
            .cloned()
            .collect();

        Ok(bookings)
    }

    async fn bookings_by_host(&self, host_email: &str) -> Result<Vec<BookingData>> {
        let bookings = self
            .inner
            .read()
            .bookings
            .iter()
            .filter(|b| b.host_email == host_email)
            .cloned()
            .collect();

        Ok(bookings)
    }

    async fn create_booking(&self, new_booking: NewBooking) -> Result<BookingData> {
        let mut inner = self.inner.write();
        let booking = BookingData {
            id: inner.next_id(),
            guest_email: new_booking.guest_email,
            host_email: new_booking.host_email,
            room_id: new_booking.room_id,
            date: new_booking.date,
            price: new_booking.price,
        };

        inner.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn delete_booking(&self, booking_id: PrimaryKey) -> Result<()> {
        // Ensure booking exists
        let _ = self.booking_by_id(booking_id).await?;

        self.inner.write().bookings.retain(|b| b.id != booking_id);
        Ok(())
    }
}
