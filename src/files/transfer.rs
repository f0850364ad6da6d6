//! Streaming a file straight onto the connection.
//!
//! The body of a file response is never held in memory. Headers go out
//! first, then the file is copied in [`FILE_BLOCK_SIZE`] blocks, each block
//! passing through a gzip encoder when one was negotiated. A gzipped file
//! response has no `content-length`; the peer reads until the connection
//! closes.
//!
//! ```text
//!  Open ──▶ HeadersSent ──▶ Streaming ──▶ Done
//!                 │              │
//!                 └──────────────┴──▶ Failed
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_compression::tokio::write::GzipEncoder;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::encoding::ContentEncoding;
use crate::http::response::StatusCode;
use crate::http::writer::serialize_head;

pub const FILE_BLOCK_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// File opened and sized, nothing written yet
    Open,
    HeadersSent,
    Streaming,
    Done,
    /// Something went wrong after the headers were written
    Failed,
}

#[derive(Debug)]
pub struct FileTransfer {
    path: PathBuf,
    file: File,
    size: u64,
    state: TransferState,
}

impl FileTransfer {
    /// Opens `path` for reading and records its size.
    ///
    /// Directories are refused with [`io::ErrorKind::NotFound`] so only
    /// regular files are ever served.
    pub async fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;

        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a regular file", path.display()),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size: metadata.len(),
            state: TransferState::Open,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Writes the response head and streams the file to `stream`.
    ///
    /// Returns the number of file bytes read. On error the transfer is left
    /// in [`TransferState::Failed`] and the connection must be dropped; part
    /// of the response may already be on the wire.
    pub async fn send<W>(
        &mut self,
        stream: &mut W,
        version: &str,
        encoding: Option<ContentEncoding>,
    ) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let result = self.send_inner(stream, version, encoding).await;
        self.state = match &result {
            Ok(_) => TransferState::Done,
            Err(_) => TransferState::Failed,
        };
        result
    }

    async fn send_inner<W>(
        &mut self,
        stream: &mut W,
        version: &str,
        encoding: Option<ContentEncoding>,
    ) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut headers = BTreeMap::new();
        headers.insert(
            "content-type".to_string(),
            "application/octet-stream".to_string(),
        );
        match encoding {
            Some(encoding) => {
                headers.insert(
                    "content-encoding".to_string(),
                    encoding.as_str().to_string(),
                );
            }
            None => {
                headers.insert("content-length".to_string(), self.size.to_string());
            }
        }

        let head = serialize_head(version, StatusCode::Ok, &headers);
        stream
            .write_all(&head)
            .await
            .context("writing file response head")?;
        self.state = TransferState::HeadersSent;

        let path = self.path.display().to_string();
        self.state = TransferState::Streaming;
        let copied = match encoding {
            Some(ContentEncoding::Gzip) => {
                let mut encoder = GzipEncoder::new(&mut *stream);
                let copied = copy_blocks(&mut self.file, &mut encoder)
                    .await
                    .with_context(|| format!("streaming {path}"))?;
                // Writes the gzip trailer.
                encoder.shutdown().await.context("finishing gzip stream")?;
                copied
            }
            None => {
                let copied = copy_blocks(&mut self.file, stream)
                    .await
                    .with_context(|| format!("streaming {path}"))?;
                stream.flush().await?;
                copied
            }
        };

        Ok(copied)
    }
}

async fn copy_blocks<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut block = [0u8; FILE_BLOCK_SIZE];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut block).await?;
        if n == 0 {
            return Ok(total);
        }

        writer.write_all(&block[..n]).await?;
        total += n as u64;
    }
}
