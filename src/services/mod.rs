//! Service implementations for Mailgun API endpoints.
//!
//! Each service module provides methods for one resource kind. Services
//! share the client's [`RequestExecutor`](crate::client::RequestExecutor)
//! and hold no other state.

pub mod bounces;
pub mod complaints;
pub mod lists;
pub mod members;
pub mod messages;
pub mod routes;
pub mod unsubscribes;

pub use bounces::BouncesService;
pub use complaints::ComplaintsService;
pub use lists::ListsService;
pub use members::MembersService;
pub use messages::MessagesService;
pub use routes::RoutesService;
pub use unsubscribes::UnsubscribesService;
