pub mod booking;
pub mod flight;
pub mod repository;

pub use booking::{Booking, BookingStatusUpdate, DEFAULT_BOOKING_STATUS};
pub use flight::{Flight, FlightTimes};
pub use repository::{BookingRepository, FlightRepository, WriteAck};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{operation} on table {table} failed: {message}")]
    Service {
        operation: &'static str,
        table: String,
        code: Option<String>,
        message: String,
    },
    #[error("Item {key} not found in table {table}")]
    NotFound { table: String, key: String },
    #[error("Malformed item in table {table}: {reason}")]
    MalformedItem { table: String, reason: String },
}

impl StoreError {
    /// Service error code reported by the backend, e.g. `ProvisionedThroughputExceededException`.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_and_code() {
        let err = StoreError::Service {
            operation: "PutItem",
            table: "flights".to_string(),
            code: Some("ThrottlingException".to_string()),
            message: "rate exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "PutItem on table flights failed: rate exceeded");
        assert_eq!(err.code(), Some("ThrottlingException"));

        let missing = StoreError::NotFound { table: "flights".to_string(), key: "FL1".to_string() };
        assert_eq!(missing.code(), None);
    }
}
