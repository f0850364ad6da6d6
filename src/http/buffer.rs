use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::parser::message_len;

/// Size of a single socket read.
pub const READ_BLOCK_SIZE: usize = 1024;

/// Bytes accumulated from a connection before parsing.
///
/// Grows one read block at a time. Growth stops when a read comes back
/// shorter than the block (nothing more pending), when the peer closes its
/// side, or when the buffer already holds a full message. A short read that
/// still leaves part of a declared body missing does not stop it.
#[derive(Debug, Default)]
pub struct RequestBuffer {
    inner: BytesMut,
}

impl RequestBuffer {
    pub fn new() -> Self {
        Self {
            inner: BytesMut::with_capacity(READ_BLOCK_SIZE * 4),
        }
    }

    /// Drains `stream` into the buffer.
    ///
    /// Any read error is returned to the caller, which abandons the
    /// connection.
    pub async fn fill_from<R>(&mut self, stream: &mut R) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut block = [0u8; READ_BLOCK_SIZE];

        loop {
            let n = stream.read(&mut block).await?;
            self.inner.extend_from_slice(&block[..n]);

            if n == 0 {
                break;
            }

            match message_len(&self.inner) {
                Some(total) if self.inner.len() >= total => break,
                Some(_) => continue,
                None if n < READ_BLOCK_SIZE => break,
                None => continue,
            }
        }

        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn stops_on_short_read() {
        let (mut client, mut server) = tokio::io::duplex(8192);
        client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();

        let mut buf = RequestBuffer::new();
        buf.fill_from(&mut server).await.unwrap();

        assert_eq!(buf.as_bytes(), b"GET / HTTP/1.1\r\n\r\n");
    }

    #[tokio::test]
    async fn waits_for_declared_body() {
        let (mut client, mut server) = tokio::io::duplex(8192);
        client
            .write_all(b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n\r\nhe")
            .await
            .unwrap();

        let reader = tokio::spawn(async move {
            let mut buf = RequestBuffer::new();
            buf.fill_from(&mut server).await.unwrap();
            buf
        });

        tokio::task::yield_now().await;
        client.write_all(b"llo").await.unwrap();

        let buf = reader.await.unwrap();
        assert!(buf.as_bytes().ends_with(b"\r\n\r\nhello"));
    }

    #[tokio::test]
    async fn exact_block_sized_request_does_not_hang() {
        let (mut client, mut server) = tokio::io::duplex(8192);
        let head = "GET / HTTP/1.1\r\nX-Pad: ";
        let pad = "a".repeat(READ_BLOCK_SIZE - head.len() - 4);
        let request = format!("{head}{pad}\r\n\r\n");
        assert_eq!(request.len(), READ_BLOCK_SIZE);
        client.write_all(request.as_bytes()).await.unwrap();

        let mut buf = RequestBuffer::new();
        buf.fill_from(&mut server).await.unwrap();

        assert_eq!(buf.len(), READ_BLOCK_SIZE);
    }

    #[tokio::test]
    async fn empty_on_immediate_close() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);

        let mut buf = RequestBuffer::new();
        buf.fill_from(&mut server).await.unwrap();

        assert!(buf.is_empty());
    }
}
