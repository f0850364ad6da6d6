use courier::http::parser::parse_http_request;
use courier::http::router::{Route, route};

fn route_for(method: &str, path: &str) -> Route {
    let raw = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
    let req = parse_http_request(raw.as_bytes()).unwrap();
    route(&req)
}

#[test]
fn test_route_get_fixed_paths() {
    assert_eq!(route_for("GET", "/"), Route::Root);
    assert_eq!(route_for("GET", "/user-agent"), Route::UserAgent);
}

#[test]
fn test_route_echo() {
    assert_eq!(route_for("GET", "/echo"), Route::Echo(String::new()));
    assert_eq!(route_for("GET", "/echo/abc"), Route::Echo("abc".to_string()));
    assert_eq!(route_for("GET", "/echo/a/b"), Route::Echo("a/b".to_string()));
    assert_eq!(route_for("GET", "/echoes"), Route::NotFound);
}

#[test]
fn test_route_files_by_method() {
    assert_eq!(
        route_for("GET", "/files/a.txt"),
        Route::ReadFile("a.txt".to_string())
    );
    assert_eq!(
        route_for("POST", "/files/a.txt"),
        Route::WriteFile("a.txt".to_string())
    );
    assert_eq!(route_for("PUT", "/files/a.txt"), Route::NotFound);
    assert_eq!(route_for("GET", "/files/"), Route::NotFound);
}

#[test]
fn test_route_post_only_serves_files() {
    assert_eq!(route_for("POST", "/"), Route::NotFound);
    assert_eq!(route_for("POST", "/echo/abc"), Route::NotFound);
}

#[test]
fn test_route_unknown() {
    assert_eq!(route_for("GET", "/nope"), Route::NotFound);
    assert_eq!(route_for("BREW", "/"), Route::NotFound);
    assert_eq!(route_for("GET", "/User-Agent"), Route::NotFound);
}
