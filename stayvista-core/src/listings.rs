use std::sync::Arc;

use crate::{Database, DatabaseError, NewRoom, PrimaryKey, RoomData};

/// Manages the rooms offered on the platform
pub struct Listings<Db> {
    db: Arc<Db>,
}

impl<Db> Listings<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>) -> Self {
        Self { db: db.clone() }
    }

    /// Publishes a new room
    pub async fn create(&self, new_room: NewRoom) -> Result<RoomData, DatabaseError> {
        self.db.create_room(new_room).await
    }

    /// Returns all rooms, optionally narrowed to a category
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<RoomData>, DatabaseError> {
        self.db.list_rooms(category).await
    }

    /// Returns a single room
    pub async fn by_id(&self, room_id: PrimaryKey) -> Result<RoomData, DatabaseError> {
        self.db.room_by_id(room_id).await
    }

    /// Returns the rooms offered by the given host
    pub async fn by_host(&self, host_email: &str) -> Result<Vec<RoomData>, DatabaseError> {
        self.db.rooms_by_host(host_email).await
    }

    /// Flips a room's booked flag
    pub async fn set_booked(
        &self,
        room_id: PrimaryKey,
        booked: bool,
    ) -> Result<RoomData, DatabaseError> {
        self.db.set_room_booked(room_id, booked).await
    }

    /// Takes a room off the platform
    pub async fn remove(&self, room_id: PrimaryKey) -> Result<(), DatabaseError> {
        self.db.delete_room(room_id).await
    }
}
