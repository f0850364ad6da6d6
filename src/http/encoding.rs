//! Content-encoding negotiation and buffered compression.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Encodings this server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

/// Encodings in order of preference.
const SUPPORTED: &[ContentEncoding] = &[ContentEncoding::Gzip];

impl ContentEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    /// Compresses a complete body in memory.
    pub fn encode(&self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::with_capacity(body.len() / 2), Compression::default());
                encoder.write_all(body)?;
                encoder.finish()
            }
        }
    }
}

/// Picks the encoding for a response from the client's `Accept-Encoding`.
///
/// The header is a comma separated list. Tokens are trimmed of spaces and
/// compared case-sensitively; quality values are not interpreted, so
/// `gzip;q=0` is not recognised as gzip. The first advertised token the
/// server supports wins.
pub fn negotiate(accept_encoding: Option<&str>) -> Option<ContentEncoding> {
    accept_encoding?
        .split(',')
        .map(|token| token.trim_matches(' '))
        .find_map(|token| SUPPORTED.iter().copied().find(|e| e.as_str() == token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_gzip_among_unknown_schemes() {
        assert_eq!(
            negotiate(Some("invalid-encoding-1, gzip, invalid-encoding-2")),
            Some(ContentEncoding::Gzip)
        );
    }

    #[test]
    fn ignores_unsupported_and_missing() {
        assert_eq!(negotiate(Some("deflate, br")), None);
        assert_eq!(negotiate(Some("GZIP")), None);
        assert_eq!(negotiate(Some("")), None);
        assert_eq!(negotiate(None), None);
    }
}
