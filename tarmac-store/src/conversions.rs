//! Mapping between domain records and DynamoDB attribute maps.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use tarmac_domain::{Booking, BookingStatusUpdate, Flight, FlightTimes, StoreError, StoreResult, DEFAULT_BOOKING_STATUS};

pub type Item = HashMap<String, AttributeValue>;

pub const FLIGHT_KEY: &str = "flight_id";
pub const BOOKING_KEY: &str = "booking_id";

pub fn flight_to_item(flight: &Flight) -> Item {
    HashMap::from([
        (FLIGHT_KEY.to_string(), AttributeValue::S(flight.flight_id.clone())),
        ("origin".to_string(), AttributeValue::S(flight.origin.clone())),
        ("arrival_time".to_string(), AttributeValue::S(flight.arrival_time.clone())),
        ("departure_time".to_string(), AttributeValue::S(flight.departure_time.clone())),
        ("destination".to_string(), AttributeValue::S(flight.destination.clone())),
        ("price".to_string(), AttributeValue::N(flight.price.to_string())),
        ("seats_available".to_string(), AttributeValue::N(flight.seats_available.to_string())),
    ])
}

pub fn item_to_flight(table: &str, item: &Item) -> StoreResult<Flight> {
    let reader = ItemReader { table, item };
    Ok(Flight {
        flight_id: reader.string(FLIGHT_KEY)?,
        origin: reader.string("origin")?,
        destination: reader.string("destination")?,
        arrival_time: reader.string("arrival_time")?,
        departure_time: reader.string("departure_time")?,
        price: reader.number("price")?,
        seats_available: reader.number("seats_available")?,
    })
}

pub fn item_to_flight_times(table: &str, item: &Item) -> StoreResult<FlightTimes> {
    let reader = ItemReader { table, item };
    Ok(FlightTimes {
        departure_time: reader.string("departure_time")?,
        arrival_time: reader.string("arrival_time")?,
    })
}

pub fn booking_to_item(booking: &Booking) -> Item {
    HashMap::from([
        (BOOKING_KEY.to_string(), AttributeValue::S(booking.booking_id.clone())),
        ("passenger_name".to_string(), AttributeValue::S(booking.passenger_name.clone())),
        ("flight_id".to_string(), AttributeValue::S(booking.flight_id.clone())),
        ("seat_number".to_string(), AttributeValue::S(booking.seat_number.clone())),
        ("status".to_string(), AttributeValue::S(booking.status.clone())),
    ])
}

pub fn item_to_booking(table: &str, item: &Item) -> StoreResult<Booking> {
    let reader = ItemReader { table, item };
    Ok(Booking {
        booking_id: reader.string(BOOKING_KEY)?,
        passenger_name: reader.string("passenger_name")?,
        flight_id: reader.string("flight_id")?,
        seat_number: reader.string("seat_number")?,
        status: reader
            .optional_string("status")?
            .unwrap_or_else(|| DEFAULT_BOOKING_STATUS.to_string()),
    })
}

pub fn item_to_status_update(table: &str, item: &Item) -> StoreResult<BookingStatusUpdate> {
    let reader = ItemReader { table, item };
    Ok(BookingStatusUpdate { status: reader.string("status")? })
}

struct ItemReader<'a> {
    table: &'a str,
    item: &'a Item,
}

impl ItemReader<'_> {
    fn malformed(&self, reason: String) -> StoreError {
        StoreError::MalformedItem { table: self.table.to_string(), reason }
    }

    fn string(&self, name: &str) -> StoreResult<String> {
        self.optional_string(name)?
            .ok_or_else(|| self.malformed(format!("missing attribute `{}`", name)))
    }

    fn optional_string(&self, name: &str) -> StoreResult<Option<String>> {
        match self.item.get(name) {
            None => Ok(None),
            Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.malformed(format!("attribute `{}` is not a string", name))),
        }
    }

    fn number<T: std::str::FromStr>(&self, name: &str) -> StoreResult<T> {
        match self.item.get(name) {
            Some(AttributeValue::N(n)) => n
                .parse()
                .map_err(|_| self.malformed(format!("attribute `{}` has unparsable number {}", name, n))),
            Some(_) => Err(self.malformed(format!("attribute `{}` is not a number", name))),
            None => Err(self.malformed(format!("missing attribute `{}`", name))),
        }
    }
}
