//! Shared handler state

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub upload_dir: Arc<PathBuf>,
    /// Held while a resource pair is numbered and written
    pub resource_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let upload_dir = Arc::new(config.upload_dir_path());
        Self {
            config: Arc::new(config),
            upload_dir,
            resource_lock: Arc::new(Mutex::new(())),
        }
    }
}
