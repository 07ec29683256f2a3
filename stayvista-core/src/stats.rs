use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{BookingData, Database, DatabaseError};

pub struct Statistics<Db> {
    db: Arc<Db>,
}

/// A single row of chart data, serialized as a two-element array so chart
/// consumers can use it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartRow {
    /// The header pseudo-row prepended to every series
    Header(&'static str, &'static str),
    /// A day label paired with the revenue recorded on it
    Point(String, f64),
}

/// Derived summary of a set of bookings, never persisted
#[derive(Debug, Clone, Serialize)]
pub struct BookingSummary {
    pub total_count: usize,
    pub total_revenue: f64,
    pub series: Vec<ChartRow>,
}

/// The system-wide report served to admins
#[derive(Debug)]
pub struct AdminReport {
    pub total_users: i64,
    pub total_rooms: i64,
    pub summary: BookingSummary,
}

/// The report a host gets over their own listings
#[derive(Debug)]
pub struct HostReport {
    pub host_since: DateTime<Utc>,
    pub total_rooms: i64,
    pub summary: BookingSummary,
}

/// Sums a set of bookings into a chartable summary.
///
/// Rows keep the input iteration order and are labeled day/month with no
/// year, so two bookings a year apart on the same calendar day produce
/// colliding labels. Consumers must not assume the series is sorted.
pub fn aggregate(bookings: &[BookingData]) -> BookingSummary {
    let mut series = Vec::with_capacity(bookings.len() + 1);
    series.push(ChartRow::Header("Day", "Sales"));

    let mut total_revenue = 0.0;

    for booking in bookings {
        let revenue = booking.price.unwrap_or(0.0);
        let label = format!("{}/{}", booking.date.day(), booking.date.month());

        total_revenue += revenue;
        series.push(ChartRow::Point(label, revenue));
    }

    BookingSummary {
        total_count: bookings.len(),
        total_revenue,
        series,
    }
}

impl<Db> Statistics<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>) -> Self {
        Self { db: db.clone() }
    }

    /// Aggregates every booking in the system, along with user and room
    /// counts
    pub async fn admin_report(&self) -> Result<AdminReport, DatabaseError> {
        let bookings = self.db.list_bookings().await?;

        Ok(AdminReport {
            total_users: self.db.count_users().await?,
            total_rooms: self.db.count_rooms().await?,
            summary: aggregate(&bookings),
        })
    }

    /// Aggregates the bookings belonging to the given host.
    ///
    /// The email must come from verified claims so a host can never read
    /// another host's numbers.
    pub async fn host_report(&self, host_email: &str) -> Result<HostReport, DatabaseError> {
        let host = self.db.user_by_email(host_email).await?;
        let bookings = self.db.bookings_by_host(host_email).await?;

        Ok(HostReport {
            host_since: host.registered_at,
            total_rooms: self.db.count_rooms_by_host(host_email).await?,
            summary: aggregate(&bookings),
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::{aggregate, ChartRow, Statistics};
    use crate::{Database, MemoryDatabase, NewBooking, NewUser, UserRole};

    fn booking(date: &str, price: Option<f64>) -> crate::BookingData {
        crate::BookingData {
            id: 0,
            guest_email: "guest@example.com".to_string(),
            host_email: "host@example.com".to_string(),
            room_id: 1,
            date: date.parse::<NaiveDate>().unwrap(),
            price,
        }
    }

    #[test]
    fn empty_input_yields_header_only() {
        let summary = aggregate(&[]);

        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.series, vec![ChartRow::Header("Day", "Sales")]);
    }

    #[test]
    fn sums_and_labels_by_day_and_month() {
        let bookings = [
            booking("2024-03-05", Some(100.0)),
            booking("2024-03-07", Some(50.0)),
        ];

        let summary = aggregate(&bookings);

        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.total_revenue, 150.0);
        assert_eq!(
            serde_json::to_value(&summary.series).unwrap(),
            json!([["Day", "Sales"], ["5/3", 100.0], ["7/3", 50.0]])
        );
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let bookings = [booking("2024-03-05", None), booking("2024-03-06", Some(25.0))];

        let summary = aggregate(&bookings);

        assert_eq!(summary.total_revenue, 25.0);
        assert_eq!(
            summary.series[1],
            ChartRow::Point("5/3".to_string(), 0.0)
        );
    }

    #[test]
    fn series_preserves_input_order() {
        let forward = [
            booking("2024-03-05", Some(100.0)),
            booking("2024-01-20", Some(75.0)),
            booking("2024-03-07", Some(50.0)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward);
        let b = aggregate(&reversed);

        // Sum and count are permutation invariant, the series is not sorted
        assert_eq!(a.total_revenue, b.total_revenue);
        assert_eq!(a.total_count, b.total_count);

        let mut expected = a.series[1..].to_vec();
        expected.reverse();
        assert_eq!(&b.series[1..], expected.as_slice());
    }

    #[tokio::test]
    async fn host_report_only_counts_own_bookings() {
        let db = Arc::new(MemoryDatabase::new());

        for email in ["a@example.com", "b@example.com"] {
            db.create_user(NewUser {
                email: email.to_string(),
                name: "Host".to_string(),
                role: UserRole::Host,
            })
            .await
            .unwrap();
        }

        for (host, price) in [
            ("a@example.com", 100.0),
            ("b@example.com", 999.0),
            ("a@example.com", 50.0),
        ] {
            db.create_booking(NewBooking {
                guest_email: "guest@example.com".to_string(),
                host_email: host.to_string(),
                room_id: 1,
                date: "2024-03-05".parse().unwrap(),
                price: Some(price),
            })
            .await
            .unwrap();
        }

        let statistics = Statistics::new(&db);
        let report = statistics.host_report("a@example.com").await.unwrap();

        assert_eq!(report.summary.total_count, 2);
        assert_eq!(report.summary.total_revenue, 150.0);
    }

    #[tokio::test]
    async fn admin_report_covers_everything() {
        let db = Arc::new(MemoryDatabase::new());

        db.create_user(NewUser {
            email: "host@example.com".to_string(),
            name: "Host".to_string(),
            role: UserRole::Host,
        })
        .await
        .unwrap();

        for price in [100.0, 50.0] {
            db.create_booking(NewBooking {
                guest_email: "guest@example.com".to_string(),
                host_email: "host@example.com".to_string(),
                room_id: 1,
                date: "2024-03-05".parse().unwrap(),
                price: Some(price),
            })
            .await
            .unwrap();
        }

        let statistics = Statistics::new(&db);
        let report = statistics.admin_report().await.unwrap();

        assert_eq!(report.total_users, 1);
        assert_eq!(report.summary.total_count, 2);
        assert_eq!(report.summary.total_revenue, 150.0);
    }
}
