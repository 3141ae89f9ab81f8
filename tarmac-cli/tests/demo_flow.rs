use tarmac_cli::{run, run_demo, DemoOptions, DEMO_BOOKING_ID, DEMO_FLIGHT_ID};
use tarmac_domain::{BookingRepository, FlightRepository, StoreError};
use tarmac_store::app_config::Config;
use tarmac_store::{MemoryBackend, TableClient};

fn memory_client() -> TableClient<MemoryBackend> {
    let config = Config::from_defaults().expect("Failed to build defaults");
    let backend = MemoryBackend::with_tables([config.tables.flights.clone(), config.tables.bookings.clone()]);
    TableClient::new(backend, &config.tables)
}

#[tokio::test]
async fn test_demo_scenario_end_to_end() {
    let client = memory_client();
    let report = run_demo(&client, DemoOptions::default()).await.unwrap();

    let created = report.created_flight.expect("flight should exist after create");
    assert_eq!(created.flight_id, "FL100");
    assert_eq!(created.origin, "KTM");
    assert_eq!(created.destination, "PKR");
    assert_eq!(created.arrival_time, "2025-06-10T09:00:00");
    assert_eq!(created.departure_time, "2025-06-10T12:00:00");
    assert_eq!(created.price, 4500.0);
    assert_eq!(created.seats_available, 120);

    let updated = report.updated_flight.expect("flight should survive the update");
    assert_eq!(updated.departure_time, "2025-06-10T10:00:00");
    assert_eq!(updated.arrival_time, "2025-06-10T13:00:00");
    assert_eq!(updated.origin, created.origin);
    assert_eq!(updated.destination, created.destination);
    assert_eq!(updated.price, created.price);
    assert_eq!(updated.seats_available, created.seats_available);

    let booking = report.created_booking.expect("booking should exist after create");
    assert_eq!(booking.booking_id, "BKG200");
    assert_eq!(booking.passenger_name, "Binaya Sharma");
    assert_eq!(booking.flight_id, "FL100");
    assert_eq!(booking.seat_number, "2A");
    assert_eq!(booking.status, "confirmed");

    let canceled = report.updated_booking.expect("booking should survive the update");
    assert_eq!(canceled.status, "canceled");
    assert_eq!(canceled.seat_number, booking.seat_number);

    // No cleanup by default
    assert!(client.get_flight(DEMO_FLIGHT_ID).await.unwrap().is_some());
    assert!(client.get_booking(DEMO_BOOKING_ID).await.unwrap().is_some());
}

#[tokio::test]
async fn test_demo_cleanup_removes_records() {
    let client = memory_client();
    run_demo(&client, DemoOptions { cleanup: true }).await.unwrap();

    assert!(client.get_flight(DEMO_FLIGHT_ID).await.unwrap().is_none());
    assert!(client.get_booking(DEMO_BOOKING_ID).await.unwrap().is_none());
}

#[tokio::test]
async fn test_demo_is_repeatable() {
    let client = memory_client();
    run_demo(&client, DemoOptions::default()).await.unwrap();
    let report = run_demo(&client, DemoOptions::default()).await.unwrap();

    // The second run overwrites the canceled booking with a fresh confirmed one
    assert_eq!(report.created_booking.unwrap().status, "confirmed");
}

#[tokio::test]
async fn test_run_with_guard_and_bootstrap() {
    let mut config = Config::from_defaults().unwrap();
    config.store.guard_updates = true;
    config.store.create_tables = true;
    config.demo.cleanup = true;

    let report = run(MemoryBackend::new(), &config).await.unwrap();
    assert_eq!(report.updated_booking.unwrap().status, "canceled");
}

#[tokio::test]
async fn test_run_without_tables_fails() {
    let config = Config::from_defaults().unwrap();

    let err = run(MemoryBackend::new(), &config).await.unwrap_err();
    let store_err = err.downcast_ref::<StoreError>().expect("store error in chain");
    assert_eq!(store_err.code(), Some("ResourceNotFoundException"));
}
