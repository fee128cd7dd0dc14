//! Messages service for the Mailgun API.
//!
//! Sends outbound messages through the domain's `messages` endpoint.

mod service;

pub use service::*;
