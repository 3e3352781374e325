// End-to-end assertions for the locale router and legacy redirects,
// exercising the production router over tower's oneshot.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;

use super::common::test_app;

async fn send(request: Request<Body>) -> Response<axum::body::Body> {
    test_app().oneshot(request).await.expect("router never errors")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &Response<axum::body::Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

fn set_cookie<'a>(response: &'a Response<axum::body::Body>) -> Option<&'a str> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap())
}

#[tokio::test]
async fn test_root_without_signals_redirects_to_default() {
    let response = send(get("/")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/fr");

    let cookie = set_cookie(&response).expect("redirect always sets the cookie");
    assert!(cookie.starts_with("LOCALE=fr"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=31536000"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_deep_path_keeps_suffix_and_query() {
    let response = send(get("/objets?categorie=tables")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/fr/objets?categorie=tables");
}

#[tokio::test]
async fn test_cookie_beats_accept_language() {
    let request = Request::builder()
        .uri("/objets")
        .header(header::COOKIE, "LOCALE=en")
        .header(header::ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en/objets");
}

#[tokio::test]
async fn test_accept_language_used_without_cookie() {
    let request = Request::builder()
        .uri("/")
        .header(header::ACCEPT_LANGUAGE, "xx,en;q=0.8,fr;q=0.5")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;
    assert_eq!(location(&response), "/en");
    assert!(set_cookie(&response).unwrap().starts_with("LOCALE=en"));
}

#[tokio::test]
async fn test_prefixed_request_passes_through() {
    let response = send(get("/fr")).await;
    assert_eq!(response.status(), StatusCode::OK);
    // No inbound cookie: the pass-through records the URL locale.
    assert!(set_cookie(&response).unwrap().starts_with("LOCALE=fr"));
}

#[tokio::test]
async fn test_pass_through_with_agreeing_cookie_writes_nothing() {
    let request = Request::builder()
        .uri("/fr/objets")
        .header(header::COOKIE, "LOCALE=fr")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookie(&response), None);
}

#[tokio::test]
async fn test_cookie_follows_explicit_url_locale() {
    let request = Request::builder()
        .uri("/en/projets")
        .header(header::COOKIE, "LOCALE=fr")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).unwrap().starts_with("LOCALE=en"));
}

#[tokio::test]
async fn test_redirect_then_cookie_is_stable() {
    let first = send(get("/matieres")).await;
    assert_eq!(first.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&first), "/fr/matieres");

    // Second visit carries the cookie the first response set and follows
    // its Location: no further redirect, no further cookie write.
    let second = send(
        Request::builder()
            .uri("/fr/matieres")
            .header(header::COOKIE, "LOCALE=fr")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(set_cookie(&second), None);
}

#[tokio::test]
async fn test_excluded_paths_are_never_redirected() {
    for uri in ["/api/health", "/images/logo.png", "/favicon.ico", "/sitemap.xml"] {
        let response = send(get(uri)).await;
        assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT, "uri {uri}");
        assert_ne!(response.status(), StatusCode::PERMANENT_REDIRECT, "uri {uri}");
        assert_eq!(set_cookie(&response), None, "uri {uri}");
    }
}

#[tokio::test]
async fn test_legacy_home_is_permanently_redirected() {
    let response = send(get("/home")).await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location(&response), "/fr");
    // Legacy redirects run before the resolver: no locale cookie involved.
    assert_eq!(set_cookie(&response), None);
}

#[tokio::test]
async fn test_legacy_wildcard_carries_slug() {
    let response = send(get("/creations/some-slug")).await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location(&response), "/fr/objet/some-slug");
}
