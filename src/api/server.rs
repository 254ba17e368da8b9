use anyhow::Result;
use runtu_comic_storage::Storage;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

pub async fn serve(addr: SocketAddr, storage: Storage, static_dir: Option<PathBuf>) -> Result<()> {
    let app = super::routes::create_router(storage, static_dir);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API available at http://{}/api/comics", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
