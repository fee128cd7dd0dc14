//! Bounces service for the Mailgun API.

mod service;

pub use service::*;
