use serde::{Deserialize, Serialize};

/// A scheduled flight. Times are kept as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub price: f64,
    pub seats_available: i32,
}

impl Flight {
    pub fn new(
        flight_id: impl Into<String>,
        origin: impl Into<String>,
        arrival_time: impl Into<String>,
        departure_time: impl Into<String>,
        destination: impl Into<String>,
        price: f64,
        seats_available: i32,
    ) -> Self {
        Self {
            flight_id: flight_id.into(),
            origin: origin.into(),
            destination: destination.into(),
            arrival_time: arrival_time.into(),
            departure_time: departure_time.into(),
            price,
            seats_available,
        }
    }
}

/// Attributes returned by a times update (updated-new values only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightTimes {
    pub departure_time: String,
    pub arrival_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_new_keeps_argument_order() {
        let flight = Flight::new("FL100", "KTM", "2025-06-10T09:00:00", "2025-06-10T12:00:00", "PKR", 4500.0, 120);
        assert_eq!(flight.arrival_time, "2025-06-10T09:00:00");
        assert_eq!(flight.departure_time, "2025-06-10T12:00:00");
        assert_eq!(flight.destination, "PKR");
    }

    #[test]
    fn test_flight_serialization() {
        let flight = Flight::new("FL100", "KTM", "a", "d", "PKR", 4500.0, 120);
        let json = serde_json::to_value(&flight).expect("Failed to serialize");
        assert_eq!(json["flight_id"], "FL100");
        assert_eq!(json["seats_available"], 120);
    }
}
