//! Server middleware
//!
//! Provides request logging and the hidden file filter for static uploads.

pub mod hidden_files;
pub mod logging;

pub use hidden_files::hide_temp_files;
pub use logging::log_request;
