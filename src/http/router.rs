//! Maps a request to the handler that serves it.
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! | Method | Target            | Route          |
//! |--------|-------------------|----------------|
//! | GET    | `/`               | `Root`         |
//! | GET    | `/user-agent`     | `UserAgent`    |
//! | GET    | `/echo`, `/echo/…`| `Echo`         |
//! | GET    | `/files/<name>`   | `ReadFile`     |
//! | POST   | `/files/<name>`   | `WriteFile`    |
//!
//! Anything else is `NotFound`.

use crate::http::request::{Method, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    UserAgent,
    /// Text to echo back, possibly empty
    Echo(String),
    /// File name relative to the served directory
    ReadFile(String),
    WriteFile(String),
    NotFound,
}

pub fn route(request: &Request) -> Route {
    let target = request.path.as_str();

    match request.method {
        Method::GET => {
            if target == "/" {
                Route::Root
            } else if target == "/user-agent" {
                Route::UserAgent
            } else if let Some(text) = echo_text(target) {
                Route::Echo(text.to_string())
            } else if let Some(name) = file_name(target) {
                Route::ReadFile(name.to_string())
            } else {
                Route::NotFound
            }
        }
        Method::POST => match file_name(target) {
            Some(name) => Route::WriteFile(name.to_string()),
            None => Route::NotFound,
        },
        _ => Route::NotFound,
    }
}

/// `/echo` yields an empty string, `/echo/<text>` yields `<text>`.
fn echo_text(target: &str) -> Option<&str> {
    let rest = target.strip_prefix("/echo")?;

    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/')
    }
}

fn file_name(target: &str) -> Option<&str> {
    target
        .strip_prefix("/files/")
        .filter(|name| !name.is_empty())
}
