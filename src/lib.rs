pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod server;
pub mod storage;
pub mod ui;

pub use config::ServerConfig;
pub use server::Server;
