pub mod api;
pub mod client;
pub mod error;
pub mod simulate;
pub mod types;

pub use api::OctoPrintApi;
pub use client::CommandClient;
pub use error::{ApiError, ApiResult};
pub use simulate::SimulatedHost;
pub use types::*;
