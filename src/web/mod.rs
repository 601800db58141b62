pub mod compatibility;
pub mod responses;
pub mod router;
pub mod state;
pub mod tarot;

pub use responses::{ApiError, json_error};
pub use state::AppState;
