use axum::Router;
use log::{info, warn};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::{AppState, build_router};
use crate::storage;

pub struct Server {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl Server {
    /// Prepares the upload directory and binds the listener.
    pub async fn new(config: ServerConfig) -> io::Result<Self> {
        let upload_dir = config.upload_dir_path();
        if let Err(e) = storage::ensure_upload_dir(&upload_dir).await {
            warn!(
                "Failed to create upload directory {}: {}",
                upload_dir.display(),
                e
            );
        } else {
            info!("Upload directory ready at: {}", upload_dir.display());
        }

        let socket = config.socket_addr();
        let listener = TcpListener::bind(&socket).await.map_err(|e| {
            io::Error::new(e.kind(), format!("failed to bind to {}: {}", socket, e))
        })?;
        let local_addr = listener.local_addr()?;
        info!("Server bound to {}", local_addr);

        let router = build_router(AppState::new(config));

        Ok(Self {
            listener,
            router,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves requests until the process is stopped.
    pub async fn start(self) -> io::Result<()> {
        info!("Server running at http://{}", self.local_addr);
        axum::serve(self.listener, self.router).await
    }
}
