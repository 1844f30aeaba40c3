pub mod client;
pub mod dashboard;
pub mod error;

pub use client::InventoryClient;
pub use dashboard::{Dashboard, SubmitOutcome};
pub use error::ClientError;
