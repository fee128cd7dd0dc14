//! Routes service for the Mailgun API.
//!
//! Routes are account-wide, so their endpoints are not scoped to the
//! sending domain.

mod responses;
mod service;

pub use responses::*;
pub use service::*;
