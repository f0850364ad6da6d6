use std::collections::BTreeMap;

use crate::http::encoding::ContentEncoding;

pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): Upload stored
/// - `BadRequest` (400): Request could not be parsed
/// - `NotFound` (404): No route, or no such file
/// - `InternalServerError` (500): Upload could not be stored
///
/// `Other` carries any code without a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    Other(u16),
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::Other(code) => *code,
        }
    }

    /// Returns the reason phrase for the status line.
    ///
    /// Codes without an entry get the generic phrase `Unknown`.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    /// assert_eq!(StatusCode::Other(418).reason_phrase(), "Unknown");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::Other(_) => "Unknown",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Header names are always lowercase and kept sorted, so identical
/// responses serialize to identical bytes. When a body was encoded,
/// `content-length` describes the encoded bytes.
#[derive(Debug)]
pub struct Response {
    /// Version echoed back from the request line
    pub version: String,
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers, names lowercased, in name order
    pub headers: BTreeMap<String, String>,
    /// Response body as transmitted
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .encoding(Some(ContentEncoding::Gzip))
///     .body(b"hello".to_vec())
///     .build()?;
/// ```
pub struct ResponseBuilder {
    version: String,
    status: StatusCode,
    headers: BTreeMap<String, String>,
    encoding: Option<ContentEncoding>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: DEFAULT_HTTP_VERSION.to_string(),
            status,
            headers: BTreeMap::new(),
            encoding: None,
            body: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds or replaces a header. The name is stored lowercased.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Negotiated content encoding, applied to the body at build time.
    pub fn encoding(mut self, encoding: Option<ContentEncoding>) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// Only content responses, those carrying a `content-type`, get framing
    /// headers. For them the negotiated encoding is applied first and
    /// `content-length` is then derived from the transmitted body, unless a
    /// length was set explicitly.
    pub fn build(mut self) -> std::io::Result<Response> {
        if self.headers.contains_key("content-type") {
            if let Some(encoding) = self.encoding {
                self.body = encoding.encode(&self.body)?;
                self.headers
                    .insert("content-encoding".to_string(), encoding.as_str().to_string());
            }

            self.headers
                .entry("content-length".to_string())
                .or_insert_with(|| self.body.len().to_string());
        }

        Ok(Response {
            version: self.version,
            status: self.status,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Response {
    /// A response with no headers and no body.
    pub fn empty(status: StatusCode, version: impl Into<String>) -> Self {
        Response {
            version: version.into(),
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// 200 OK with no body.
    pub fn ok(version: impl Into<String>) -> Self {
        Self::empty(StatusCode::Ok, version)
    }

    /// 404 Not Found with no body.
    pub fn not_found(version: impl Into<String>) -> Self {
        Self::empty(StatusCode::NotFound, version)
    }

    /// 400 Bad Request, sent when the request could not be parsed.
    pub fn bad_request() -> Self {
        Self::empty(StatusCode::BadRequest, DEFAULT_HTTP_VERSION)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
