//! Courier - minimal HTTP/1.1 server
//!
//! Echo, user-agent and static file routes over a hand-written HTTP parser,
//! with gzip when the client asks for it.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
