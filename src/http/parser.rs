//! Request parsing from the accumulated connection buffer.
//!
//! Parsing runs in three passes over the bytes: the request line up to the
//! first CRLF, the header block up to the first blank line, and the body,
//! which is whatever follows the blank line.

use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no request line")]
    MissingRequestLine,
    #[error("malformed request line {0:?}")]
    MalformedRequestLine(String),
    #[error("request head is not terminated by a blank line")]
    MissingHeaderTerminator,
    #[error("request head is not valid UTF-8")]
    InvalidEncoding,
    #[error("invalid content-length {0:?}")]
    InvalidContentLength(String),
    #[error("body has {actual} bytes, content-length declared {expected}")]
    IncompleteBody { expected: usize, actual: usize },
}

/// Parses one complete request out of `buf`.
///
/// The buffer is expected to hold everything the peer sent; nothing is left
/// over for a following request since connections carry a single exchange.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let headers_end = find_headers_end(buf).ok_or_else(|| {
        if find(buf, CRLF).is_some() {
            ParseError::MissingHeaderTerminator
        } else {
            ParseError::MissingRequestLine
        }
    })?;

    let head = std::str::from_utf8(&buf[..headers_end]).map_err(|_| ParseError::InvalidEncoding)?;
    let body_bytes = &buf[headers_end + HEADER_TERMINATOR.len()..];

    // The head has no trailing CRLF, so a request without headers is just
    // the request line.
    let (request_line, header_block) = head.split_once("\r\n").unwrap_or((head, ""));
    let (method, path, version) = parse_request_line(request_line)?;

    let headers = parse_headers(header_block);

    let body = match headers.get("content-length") {
        Some(raw) => {
            let expected = parse_content_length(raw)?;
            if body_bytes.len() < expected {
                return Err(ParseError::IncompleteBody {
                    expected,
                    actual: body_bytes.len(),
                });
            }
            body_bytes[..expected].to_vec()
        }
        None => body_bytes.to_vec(),
    };

    Ok(Request {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

/// Total length of the message in `buf` once its head is complete.
///
/// Returns `None` while the blank line ending the head has not arrived. When
/// the head declares a usable `content-length`, the body is included in the
/// returned length; otherwise the head alone counts, and any problem with it
/// is left for [`parse_http_request`] to report. A declared length that
/// overflows counts as already complete.
pub fn message_len(buf: &[u8]) -> Option<usize> {
    let headers_end = find_headers_end(buf)?;
    let body_start = headers_end + HEADER_TERMINATOR.len();

    let declared = std::str::from_utf8(&buf[..headers_end])
        .ok()
        .and_then(|head| {
            let (_, header_block) = head.split_once("\r\n")?;
            parse_headers(header_block).remove("content-length")
        })
        .and_then(|raw| parse_content_length(&raw).ok())
        .unwrap_or(0);

    // A length too large to add up can never arrive; report the message as
    // complete so the parser rejects it.
    Some(body_start.checked_add(declared).unwrap_or(buf.len()))
}

fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();

    match parts.as_slice() {
        [method, path, version]
            if !method.is_empty() && !path.is_empty() && !version.is_empty() =>
        {
            Ok((*method, *path, *version))
        }
        _ => Err(ParseError::MalformedRequestLine(line.to_string())),
    }
}

fn parse_headers(block: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in block.split("\r\n") {
        match parse_header_line(line) {
            Some((name, value)) => {
                headers.insert(name, value);
            }
            None => {
                if !line.is_empty() {
                    tracing::debug!(line, "skipping unrecognised header line");
                }
            }
        }
    }

    headers
}

/// Matches `name ": " value`, where the name is letters, digits, `-` or `_`
/// and the value runs to the end of the line (possibly empty).
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(": ")?;

    let valid_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if !valid_name {
        return None;
    }

    Some((name.to_ascii_lowercase(), value.to_string()))
}

fn parse_content_length(raw: &str) -> Result<usize, ParseError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    find(buf, HEADER_TERMINATOR)
}

fn find(buf: &[u8], needle: &[u8]) -> Option<usize> {
    buf.windows(needle.len()).position(|w| w == needle)
}
