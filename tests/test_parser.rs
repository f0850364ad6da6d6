use courier::http::parser::{ParseError, message_len, parse_http_request};
use courier::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_request_without_headers() {
    let parsed = parse_http_request(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.path, "/echo/abc");
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/files/a");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_body_without_content_length_is_verbatim() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\n\r\nraw\r\n\r\nbytes";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"raw\r\n\r\nbytes".to_vec());
}

#[test]
fn test_parse_body_truncated_to_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcdef";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
}

#[test]
fn test_parse_headers_are_lowercased() {
    let req = b"GET / HTTP/1.1\r\nUser-Agent: foobar/1.2.3\r\nACCEPT-ENCODING: gzip\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("user-agent").unwrap(), "foobar/1.2.3");
    assert_eq!(parsed.headers.get("accept-encoding").unwrap(), "gzip");
    assert!(!parsed.headers.contains_key("User-Agent"));
}

#[test]
fn test_parse_last_duplicate_header_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Dup: one\r\nx-dup: two\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("x-dup").unwrap(), "two");
}

#[test]
fn test_parse_skips_non_matching_header_lines() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nNo-Space:x\r\nHost: ok\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.headers.get("host").unwrap(), "ok");
}

#[test]
fn test_parse_keeps_empty_header_value() {
    let parsed = parse_http_request(b"GET / HTTP/1.1\r\nUser-Agent: \r\n\r\n").unwrap();

    assert_eq!(parsed.headers.get("user-agent").unwrap(), "");
}

#[test]
fn test_parse_unknown_method_is_kept() {
    let parsed = parse_http_request(b"BREW /pot HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /echo/x?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/echo/x?q=rust");
}

#[test]
fn test_parse_empty_buffer() {
    assert_eq!(parse_http_request(b""), Err(ParseError::MissingRequestLine));
}

#[test]
fn test_parse_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert_eq!(
        parse_http_request(req),
        Err(ParseError::MissingHeaderTerminator)
    );
}

#[test]
fn test_parse_request_line_token_count() {
    for line in ["GET /", "GET / HTTP/1.1 extra", "GET  / HTTP/1.1", "GET"] {
        let req = format!("{line}\r\n\r\n");
        let result = parse_http_request(req.as_bytes());

        assert!(
            matches!(result, Err(ParseError::MalformedRequestLine(_))),
            "{line:?} gave {result:?}"
        );
    }
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: ten\r\n\r\nhello";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::InvalidContentLength(_))
    ));
}

#[test]
fn test_parse_incomplete_body() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";

    assert_eq!(
        parse_http_request(req),
        Err(ParseError::IncompleteBody {
            expected: 10,
            actual: 5
        })
    );
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /files/bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\xff\x02\x03";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 0xff, 2, 3]);
}

#[test]
fn test_parse_non_utf8_head() {
    let req = b"GET /\xff HTTP/1.1\r\n\r\n";

    assert_eq!(parse_http_request(req), Err(ParseError::InvalidEncoding));
}

#[test]
fn test_parse_content_length_at_usize_max() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\nx";

    assert_eq!(message_len(req), Some(req.len()));
    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::IncompleteBody { actual: 1, .. })
    ));
}
