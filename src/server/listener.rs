use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::files::ServedDirectory;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    let directory = cfg.served_directory();
    match &directory {
        Some(dir) => info!("Serving files from {}", dir.root().display()),
        None => warn!("No --directory given; /files/ routes will answer 404"),
    }

    serve(listener, directory).await
}

/// Accepts connections forever, handling each on its own task.
pub async fn serve(listener: TcpListener, directory: Option<ServedDirectory>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Error accepting connection: {}", e);
                continue;
            }
        };
        debug!("Accepted connection from {}", peer);

        let directory = directory.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, directory);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
