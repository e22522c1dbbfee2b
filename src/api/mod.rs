pub mod client;
pub mod error;
pub mod mock;
pub mod traits;

pub use client::SemgrepClient;
pub use error::ApiError;
pub use mock::{MockPolicyApi, RecordedUpdate};
pub use traits::{PolicyApi, UpdateResponse};
