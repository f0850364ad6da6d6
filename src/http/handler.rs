//! Route handlers.
//!
//! Every route except file downloads produces a complete [`Response`]. A
//! file download produces an opened [`FileTransfer`] instead, which the
//! connection then streams itself.

use tracing::{debug, warn};

use crate::files::{FileTransfer, ServedDirectory, upload};
use crate::http::encoding::{self, ContentEncoding};
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::router::{Route, route};

pub enum Outcome {
    Respond(Response),
    Stream {
        transfer: FileTransfer,
        version: String,
        encoding: Option<ContentEncoding>,
    },
}

/// Runs the handler for `req`.
///
/// Route-local failures (missing file, failed upload) become error
/// responses. An `Err` means the connection cannot be answered at all, for
/// example because compressing the body failed.
pub async fn handle(req: &Request, directory: Option<&ServedDirectory>) -> anyhow::Result<Outcome> {
    let encoding = encoding::negotiate(req.accept_encoding());
    let version = req.version.as_str();

    let response = match route(req) {
        Route::Root => Response::ok(version),
        Route::UserAgent => text(version, req.user_agent(), encoding)?,
        Route::Echo(s) => text(version, &s, encoding)?,
        Route::ReadFile(name) => {
            let Some(path) = directory.and_then(|dir| dir.resolve(&name)) else {
                debug!(name = %name, "file name not servable");
                return Ok(Outcome::Respond(Response::not_found(version)));
            };

            match FileTransfer::open(&path).await {
                Ok(transfer) => {
                    return Ok(Outcome::Stream {
                        transfer,
                        version: version.to_string(),
                        encoding,
                    });
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "cannot open file");
                    Response::not_found(version)
                }
            }
        }
        Route::WriteFile(name) => match directory.and_then(|dir| dir.resolve(&name)) {
            None => {
                debug!(name = %name, "upload name not servable");
                Response::not_found(version)
            }
            Some(path) => match upload::store(&path, &req.body).await {
                Ok(()) => {
                    debug!(path = %path.display(), bytes = req.body.len(), "stored upload");
                    Response::empty(StatusCode::Created, version)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to store upload");
                    Response::empty(StatusCode::InternalServerError, version)
                }
            },
        },
        Route::NotFound => Response::not_found(version),
    };

    Ok(Outcome::Respond(response))
}

fn text(version: &str, body: &str, encoding: Option<ContentEncoding>) -> anyhow::Result<Response> {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .version(version)
        .header("content-type", "text/plain")
        .encoding(encoding)
        .body(body)
        .build()?;

    Ok(response)
}
