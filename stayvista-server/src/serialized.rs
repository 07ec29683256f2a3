//! All shapes that are exposed from endpoints are defined here
//! along with the conversions from core data

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use stayvista_core::{
    AdminReport, BookingData, ChartRow, HostReport, PrimaryKey, RoomData, UserData, UserRole,
};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: PrimaryKey,
    email: String,
    name: String,
    #[schema(value_type = String)]
    role: UserRole,
    registered_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    id: PrimaryKey,
    title: String,
    location: String,
    category: String,
    price_per_night: f64,
    description: String,
    host_email: String,
    booked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    id: PrimaryKey,
    guest_email: String,
    host_email: String,
    room_id: PrimaryKey,
    date: NaiveDate,
    price: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    total_users: i64,
    total_rooms: i64,
    total_bookings: usize,
    total_price: f64,
    #[schema(value_type = Vec<Vec<String>>)]
    chart_data: Vec<ChartRow>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostStats {
    host_since: DateTime<Utc>,
    total_rooms: i64,
    total_bookings: usize,
    total_price: f64,
    #[schema(value_type = Vec<Vec<String>>)]
    chart_data: Vec<ChartRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Success {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecret {
    pub client_secret: String,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl<I, O> ToSerialized<Vec<O>> for Vec<I>
where
    I: ToSerialized<O>,
    O: Serialize,
{
    fn to_serialized(&self) -> Vec<O> {
        self.iter().map(|x| x.to_serialized()).collect()
    }
}

impl ToSerialized<User> for UserData {
    fn to_serialized(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            registered_at: self.registered_at,
        }
    }
}

impl ToSerialized<Room> for RoomData {
    fn to_serialized(&self) -> Room {
        Room {
            id: self.id,
            title: self.title.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            price_per_night: self.price_per_night,
            description: self.description.clone(),
            host_email: self.host_email.clone(),
            booked: self.booked,
        }
    }
}

impl ToSerialized<Booking> for BookingData {
    fn to_serialized(&self) -> Booking {
        Booking {
            id: self.id,
            guest_email: self.guest_email.clone(),
            host_email: self.host_email.clone(),
            room_id: self.room_id,
            date: self.date,
            price: self.price,
        }
    }
}

impl ToSerialized<AdminStats> for AdminReport {
    fn to_serialized(&self) -> AdminStats {
        AdminStats {
            total_users: self.total_users,
            total_rooms: self.total_rooms,
            total_bookings: self.summary.total_count,
            total_price: self.summary.total_revenue,
            chart_data: self.summary.series.clone(),
        }
    }
}

impl ToSerialized<HostStats> for HostReport {
    fn to_serialized(&self) -> HostStats {
        HostStats {
            host_since: self.host_since,
            total_rooms: self.total_rooms,
            total_bookings: self.summary.total_count,
            total_price: self.summary.total_revenue,
            chart_data: self.summary.series.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use stayvista_core::{aggregate, AdminReport, BookingData};

    use super::ToSerialized;

    #[test]
    fn admin_stats_serialize_in_the_shape_charts_expect() {
        let bookings = [BookingData {
            id: 1,
            guest_email: "guest@example.com".to_string(),
            host_email: "host@example.com".to_string(),
            room_id: 2,
            date: "2024-03-05".parse().unwrap(),
            price: Some(100.0),
        }];

        let report = AdminReport {
            total_users: 4,
            total_rooms: 3,
            summary: aggregate(&bookings),
        };

        let value = serde_json::to_value(report.to_serialized()).unwrap();

        assert_eq!(
            value,
            json!({
                "totalUsers": 4,
                "totalRooms": 3,
                "totalBookings": 1,
                "totalPrice": 100.0,
                "chartData": [["Day", "Sales"], ["5/3", 100.0]],
            })
        );
    }
}
