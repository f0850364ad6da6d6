use std::io;
use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Permission bits for uploaded files (owner rw, group and other r).
#[cfg(unix)]
const UPLOAD_MODE: u32 = 0o644;

/// Writes `body` to `path`, creating the file or truncating an existing one.
///
/// The whole body is already in memory; it is written in one go.
pub async fn store(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(UPLOAD_MODE);

    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.flush().await?;

    Ok(())
}
