pub mod app_config;
pub mod backend;
pub mod conversions;
pub mod dynamo;
pub mod memory;
pub mod table_client;

pub use backend::{ItemBackend, TableRef};
pub use dynamo::DynamoBackend;
pub use memory::MemoryBackend;
pub use table_client::TableClient;
