use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::{BookingData, Database, DatabaseError, NewBooking, PrimaryKey};

/// Manages the booking lifecycle
pub struct Bookings<Db> {
    db: Arc<Db>,
}

impl<Db> Bookings<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>) -> Self {
        Self { db: db.clone() }
    }

    /// Books a room for a guest.
    ///
    /// The host is taken from the room record, never from the caller, and
    /// the room is marked booked.
    pub async fn book(
        &self,
        guest_email: &str,
        room_id: PrimaryKey,
        date: NaiveDate,
        price: Option<f64>,
    ) -> Result<BookingData, DatabaseError> {
        let room = self.db.room_by_id(room_id).await?;

        let booking = self
            .db
            .create_booking(NewBooking {
                guest_email: guest_email.to_string(),
                host_email: room.host_email,
                room_id: room.id,
                date,
                price,
            })
            .await?;

        self.db.set_room_booked(room.id, true).await?;

        info!("Booked room {} for {}", room.id, guest_email);

        Ok(booking)
    }

    /// Cancels a booking, freeing up the room again
    pub async fn cancel(&self, booking_id: PrimaryKey) -> Result<(), DatabaseError> {
        let booking = self.db.booking_by_id(booking_id).await?;

        self.db.delete_booking(booking.id).await?;
        self.db.set_room_booked(booking.room_id, false).await?;

        Ok(())
    }

    /// Returns the bookings made by the given guest
    pub async fn for_guest(&self, guest_email: &str) -> Result<Vec<BookingData>, DatabaseError> {
        self.db.bookings_by_guest(guest_email).await
    }

    /// Returns the bookings against the given host's rooms
    pub async fn for_host(&self, host_email: &str) -> Result<Vec<BookingData>, DatabaseError> {
        self.db.bookings_by_host(host_email).await
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::Bookings;
    use crate::{Database, MemoryDatabase, NewRoom};

    #[tokio::test]
    async fn booking_flips_the_room_flag_both_ways() {
        let db = Arc::new(MemoryDatabase::new());
        let bookings = Bookings::new(&db);

        let room = db
            .create_room(NewRoom {
                title: "Seaside cabin".to_string(),
                location: "Lofoten".to_string(),
                category: "Cabin".to_string(),
                price_per_night: 120.0,
                description: "Two beds, one view".to_string(),
                host_email: "host@example.com".to_string(),
            })
            .await
            .unwrap();

        let booking = bookings
            .book(
                "guest@example.com",
                room.id,
                "2024-03-05".parse().unwrap(),
                Some(120.0),
            )
            .await
            .unwrap();

        assert_eq!(booking.host_email, "host@example.com");
        assert!(db.room_by_id(room.id).await.unwrap().booked);

        bookings.cancel(booking.id).await.unwrap();
        assert!(!db.room_by_id(room.id).await.unwrap().booked);
    }
}
