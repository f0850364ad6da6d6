use std::collections::HashMap;

/// HTTP request methods.
///
/// Only GET and POST are routed to handlers. Every other method, including
/// ones this server has never heard of, falls through to 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other method token, kept verbatim
    Other(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are lowercased when the request is parsed, so lookups through
/// [`Request::header`] are effectively case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, path and query (e.g., "/echo/abc")
    pub path: String,
    /// HTTP version token from the request line (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, names lowercased
    pub headers: HashMap<String, String>,
    /// Raw request body
    pub body: Vec<u8>,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive. Unknown tokens become [`Method::Other`].
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// The name is lowercased before lookup.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// The `User-Agent` value, or an empty string when the client sent none.
    pub fn user_agent(&self) -> &str {
        self.header("user-agent").unwrap_or("")
    }

    /// The raw `Accept-Encoding` value, if any.
    pub fn accept_encoding(&self) -> Option<&str> {
        self.header("accept-encoding")
    }
}
