use serde::{Deserialize, Serialize};

pub const DEFAULT_BOOKING_STATUS: &str = "confirmed";

/// A seat booking. `flight_id` is a plain reference and is never checked
/// against the flights table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub passenger_name: String,
    pub flight_id: String,
    pub seat_number: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_BOOKING_STATUS.to_string()
}

impl Booking {
    /// New booking with the default `confirmed` status
    pub fn new(
        booking_id: impl Into<String>,
        passenger_name: impl Into<String>,
        flight_id: impl Into<String>,
        seat_number: impl Into<String>,
    ) -> Self {
        Self {
            booking_id: booking_id.into(),
            passenger_name: passenger_name.into(),
            flight_id: flight_id.into(),
            seat_number: seat_number.into(),
            status: default_status(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_defaults_to_confirmed() {
        let booking = Booking::new("BKG200", "Binaya Sharma", "FL100", "2A");
        assert_eq!(booking.status, "confirmed");

        let held = booking.with_status("pending");
        assert_eq!(held.status, "pending");
    }

    #[test]
    fn test_booking_deserialization_without_status() {
        let json = r#"
            {
                "booking_id": "BKG1",
                "passenger_name": "Asha",
                "flight_id": "FL9",
                "seat_number": "14C"
            }
        "#;
        let booking: Booking = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(booking.status, DEFAULT_BOOKING_STATUS);
        assert_eq!(booking.seat_number, "14C");
    }
}
