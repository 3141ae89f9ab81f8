use async_trait::async_trait;

use crate::booking::{Booking, BookingStatusUpdate};
use crate::flight::{Flight, FlightTimes};
use crate::StoreResult;

/// Write confirmation carrying whatever metadata the service returned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteAck {
    pub request_id: Option<String>,
    pub consumed_capacity: Option<f64>,
}

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Writes the whole record, replacing any item stored under the same id.
    async fn create_flight(&self, flight: &Flight) -> StoreResult<WriteAck>;

    async fn get_flight(&self, flight_id: &str) -> StoreResult<Option<Flight>>;

    async fn update_flight_times(
        &self,
        flight_id: &str,
        new_departure_time: &str,
        new_arrival_time: &str,
    ) -> StoreResult<FlightTimes>;

    /// Deleting an unknown id succeeds.
    async fn delete_flight(&self, flight_id: &str) -> StoreResult<WriteAck>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &Booking) -> StoreResult<WriteAck>;

    async fn get_booking(&self, booking_id: &str) -> StoreResult<Option<Booking>>;

    async fn update_booking_status(
        &self,
        booking_id: &str,
        new_status: &str,
    ) -> StoreResult<BookingStatusUpdate>;

    async fn delete_booking(&self, booking_id: &str) -> StoreResult<WriteAck>;
}
