use anyhow::Context;
use serde::Serialize;
use tarmac_domain::{Booking, BookingRepository, Flight, FlightRepository};
use tarmac_store::app_config::Config;
use tarmac_store::{ItemBackend, TableClient};
use tracing::info;

pub const DEMO_FLIGHT_ID: &str = "FL100";
pub const DEMO_BOOKING_ID: &str = "BKG200";

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoOptions {
    /// Delete the demo booking and flight at the end of the run
    pub cleanup: bool,
}

/// Records read back after each write step of the demo
#[derive(Debug, Default)]
pub struct DemoReport {
    pub created_flight: Option<Flight>,
    pub updated_flight: Option<Flight>,
    pub created_booking: Option<Booking>,
    pub updated_booking: Option<Booking>,
}

fn print_record<T: Serialize>(label: &str, record: &Option<T>) -> anyhow::Result<()> {
    println!("{}: {}", label, serde_json::to_string(record)?);
    Ok(())
}

pub async fn run_demo<R>(repo: &R, options: DemoOptions) -> anyhow::Result<DemoReport>
where
    R: FlightRepository + BookingRepository,
{
    let mut report = DemoReport::default();

    // Flights
    let flight = Flight::new(
        DEMO_FLIGHT_ID,
        "KTM",
        "2025-06-10T09:00:00",
        "2025-06-10T12:00:00",
        "PKR",
        4500.0,
        120,
    );
    repo.create_flight(&flight).await.context("create_flight failed")?;
    report.created_flight = repo.get_flight(DEMO_FLIGHT_ID).await.context("get_flight failed")?;
    print_record("Created Flight", &report.created_flight)?;

    let times = repo
        .update_flight_times(DEMO_FLIGHT_ID, "2025-06-10T10:00:00", "2025-06-10T13:00:00")
        .await
        .context("update_flight_times failed")?;
    info!("Flight {} now departs {} and arrives {}", DEMO_FLIGHT_ID, times.departure_time, times.arrival_time);
    report.updated_flight = repo.get_flight(DEMO_FLIGHT_ID).await.context("get_flight failed")?;
    print_record("Updated Flight Times", &report.updated_flight)?;

    // Bookings
    let booking = Booking::new(DEMO_BOOKING_ID, "Binaya Sharma", DEMO_FLIGHT_ID, "2A");
    repo.create_booking(&booking).await.context("create_booking failed")?;
    report.created_booking = repo.get_booking(DEMO_BOOKING_ID).await.context("get_booking failed")?;
    print_record("Created Booking", &report.created_booking)?;

    let update = repo
        .update_booking_status(DEMO_BOOKING_ID, "canceled")
        .await
        .context("update_booking_status failed")?;
    info!("Booking {} status is now {}", DEMO_BOOKING_ID, update.status);
    report.updated_booking = repo.get_booking(DEMO_BOOKING_ID).await.context("get_booking failed")?;
    print_record("Updated Booking Status", &report.updated_booking)?;

    if options.cleanup {
        repo.delete_booking(DEMO_BOOKING_ID).await.context("delete_booking failed")?;
        repo.delete_flight(DEMO_FLIGHT_ID).await.context("delete_flight failed")?;
        info!("Removed demo booking {} and flight {}", DEMO_BOOKING_ID, DEMO_FLIGHT_ID);
    }

    Ok(report)
}

/// Wires a backend into the table client per config and runs the demo.
pub async fn run<B: ItemBackend>(backend: B, config: &Config) -> anyhow::Result<DemoReport> {
    let client = TableClient::new(backend, &config.tables).with_update_guard(config.store.guard_updates);

    if config.store.create_tables {
        client.ensure_tables().await.context("Failed to create tables")?;
    }

    run_demo(&client, DemoOptions { cleanup: config.demo.cleanup }).await
}
