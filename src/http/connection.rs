use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::files::{FileTransfer, ServedDirectory};
use crate::http::buffer::RequestBuffer;
use crate::http::encoding::ContentEncoding;
use crate::http::handler::{self, Outcome};
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// One accepted connection, serving exactly one request.
pub struct Connection<S = TcpStream> {
    stream: S,
    directory: Option<ServedDirectory>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Streaming {
        transfer: FileTransfer,
        version: String,
        encoding: Option<ContentEncoding>,
    },
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, directory: Option<ServedDirectory>) -> Self {
        Self {
            stream,
            directory,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to completion and shuts down the write side.
    ///
    /// Any error leaves the connection abandoned; the caller only logs it.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = self.read_request().await?;
                }

                ConnectionState::Processing(req) => {
                    self.state = match handler::handle(&req, self.directory.as_ref()).await? {
                        Outcome::Respond(response) => {
                            info!(
                                method = %req.method,
                                path = %req.path,
                                status = response.status.as_u16(),
                                encoding = response.header("content-encoding").unwrap_or("identity"),
                                bytes = response.body.len(),
                                "request served"
                            );
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                        Outcome::Stream {
                            transfer,
                            version,
                            encoding,
                        } => {
                            info!(
                                method = %req.method,
                                path = %req.path,
                                status = 200,
                                size = transfer.size(),
                                gzip = encoding.is_some(),
                                "streaming file"
                            );
                            ConnectionState::Streaming {
                                transfer,
                                version,
                                encoding,
                            }
                        }
                    };
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                }

                ConnectionState::Streaming {
                    mut transfer,
                    version,
                    encoding,
                } => {
                    match transfer.send(&mut self.stream, &version, encoding).await {
                        Ok(copied) => debug!(bytes = copied, "file streamed"),
                        Err(e) => {
                            // Part of the response may be out already; only
                            // dropping the connection is left.
                            warn!(state = ?transfer.state(), "file transfer aborted");
                            return Err(e);
                        }
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        // The peer may already be gone; nothing is left to tell it.
        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "shutdown after response failed");
        }

        Ok(())
    }

    /// Reads and parses the single request this connection carries.
    ///
    /// Moves to `Closed` when the peer sent nothing and to `Writing` a 400
    /// when the bytes do not form a request.
    async fn read_request(&mut self) -> anyhow::Result<ConnectionState> {
        let mut buffer = RequestBuffer::new();
        buffer.fill_from(&mut self.stream).await?;

        if buffer.is_empty() {
            debug!("peer closed without sending a request");
            return Ok(ConnectionState::Closed);
        }

        match parse_http_request(buffer.as_bytes()) {
            Ok(req) => Ok(ConnectionState::Processing(req)),
            Err(e) => {
                warn!(error = %e, bytes = buffer.len(), "malformed request");
                Ok(ConnectionState::Writing(ResponseWriter::new(
                    &Response::bad_request(),
                )))
            }
        }
    }
}
