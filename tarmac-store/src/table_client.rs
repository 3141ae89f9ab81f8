use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tarmac_domain::{
    Booking, BookingRepository, BookingStatusUpdate, Flight, FlightRepository, FlightTimes, StoreResult,
    WriteAck,
};
use tracing::info;

use crate::app_config::TablesConfig;
use crate::backend::{ItemBackend, TableRef};
use crate::conversions::{self, BOOKING_KEY, FLIGHT_KEY};

/// Data-access facade over the flights and bookings tables.
/// Every repository call is exactly one backend item operation.
pub struct TableClient<B> {
    backend: B,
    flights: TableRef,
    bookings: TableRef,
    guard_updates: bool,
}

impl<B: ItemBackend> TableClient<B> {
    pub fn new(backend: B, tables: &TablesConfig) -> Self {
        Self {
            backend,
            flights: TableRef::new(tables.flights.clone(), FLIGHT_KEY),
            bookings: TableRef::new(tables.bookings.clone(), BOOKING_KEY),
            guard_updates: false,
        }
    }

    /// Make updates fail with `NotFound` instead of creating partial items.
    pub fn with_update_guard(mut self, enabled: bool) -> Self {
        self.guard_updates = enabled;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn flights_table(&self) -> &TableRef {
        &self.flights
    }

    pub fn bookings_table(&self) -> &TableRef {
        &self.bookings
    }

    pub async fn ensure_tables(&self) -> StoreResult<()> {
        info!("Ensuring tables {} and {} exist", self.flights.name, self.bookings.name);
        self.backend.ensure_table(&self.flights).await?;
        self.backend.ensure_table(&self.bookings).await
    }
}

#[async_trait]
impl<B: ItemBackend> FlightRepository for TableClient<B> {
    async fn create_flight(&self, flight: &Flight) -> StoreResult<WriteAck> {
        self.backend.put_item(&self.flights, conversions::flight_to_item(flight)).await
    }

    async fn get_flight(&self, flight_id: &str) -> StoreResult<Option<Flight>> {
        self.backend
            .get_item(&self.flights, flight_id)
            .await?
            .map(|item| conversions::item_to_flight(&self.flights.name, &item))
            .transpose()
    }

    async fn update_flight_times(
        &self,
        flight_id: &str,
        new_departure_time: &str,
        new_arrival_time: &str,
    ) -> StoreResult<FlightTimes> {
        let updates = vec![
            ("departure_time", AttributeValue::S(new_departure_time.to_string())),
            ("arrival_time", AttributeValue::S(new_arrival_time.to_string())),
        ];
        let attributes = self
            .backend
            .update_item(&self.flights, flight_id, updates, self.guard_updates)
            .await?;
        conversions::item_to_flight_times(&self.flights.name, &attributes)
    }

    async fn delete_flight(&self, flight_id: &str) -> StoreResult<WriteAck> {
        self.backend.delete_item(&self.flights, flight_id).await
    }
}

#[async_trait]
impl<B: ItemBackend> BookingRepository for TableClient<B> {
    async fn create_booking(&self, booking: &Booking) -> StoreResult<WriteAck> {
        self.backend.put_item(&self.bookings, conversions::booking_to_item(booking)).await
    }

    async fn get_booking(&self, booking_id: &str) -> StoreResult<Option<Booking>> {
        self.backend
            .get_item(&self.bookings, booking_id)
            .await?
            .map(|item| conversions::item_to_booking(&self.bookings.name, &item))
            .transpose()
    }

    async fn update_booking_status(&self, booking_id: &str, new_status: &str) -> StoreResult<BookingStatusUpdate> {
        let updates = vec![("status", AttributeValue::S(new_status.to_string()))];
        let attributes = self
            .backend
            .update_item(&self.bookings, booking_id, updates, self.guard_updates)
            .await?;
        conversions::item_to_status_update(&self.bookings.name, &attributes)
    }

    async fn delete_booking(&self, booking_id: &str) -> StoreResult<WriteAck> {
        self.backend.delete_item(&self.bookings, booking_id).await
    }
}
