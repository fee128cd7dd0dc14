//! Mailing list members service for the Mailgun API.
//!
//! Members are addressed through their list; bulk additions go through the
//! `members.json` endpoint and are capped at
//! [`MAX_BULK_MEMBERS`](crate::types::MAX_BULK_MEMBERS) per call.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
