//! Status API access
//!
//! Fetching, shape validation and status translation, in the order the
//! poller applies them:
//!
//! - [`fetcher`] - HTTP query with the `from_date` cursor
//! - [`validate`] - response contract check
//! - [`status`] - status code to chat message

pub mod fetcher;
pub mod status;
pub mod validate;

pub use fetcher::{PracticumClient, StatusSource};
pub use status::parse_status;
pub use validate::check_response;
