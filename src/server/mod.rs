//! Server core functionality
//!
//! Binds the HTTP listener and runs the application router.

pub mod core;

pub use self::core::Server;
