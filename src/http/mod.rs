//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked transfer coding.
//!
//! # Architecture
//!
//! - **`buffer`**: drains the socket into a byte buffer until the request is in
//! - **`parser`**: splits the buffer into request line, headers and body
//! - **`request`**: HTTP request representation
//! - **`router`**: picks the route for a method and target
//! - **`handler`**: runs the route, producing a response or a file transfer
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip for buffered bodies
//! - **`writer`**: serializes and writes HTTP responses to the client
//! - **`connection`**: the per-connection state machine tying it together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate request bytes
//!        └──────┬──────┘
//!               │ Request parsed (or 400 on malformed input)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │
//!        ┌──────┴──────────────────┐
//!        ▼                         ▼
//!  ┌────────────┐          ┌──────────────┐
//!  │  Writing   │          │  Streaming   │ ← File body, block by block
//!  └─────┬──────┘          └──────┬───────┘
//!        └──────────┬─────────────┘
//!                   ▼
//!               Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use courier::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, None);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod buffer;
pub mod connection;
pub mod encoding;
pub mod handler;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod writer;
