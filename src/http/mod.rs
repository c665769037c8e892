//! REST API
//!
//! Upload and delete endpoints over the upload directory, plus static
//! serving of its contents.

pub mod handlers;
pub mod multipart;
pub mod responses;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
