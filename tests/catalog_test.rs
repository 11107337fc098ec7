//! Catalog (TMDB) client tests
//!
//! Tests popular listings, search, details, auth and error handling.

use mockito::{Matcher, Server};
use movieflex::api::{CatalogClient, CatalogError};

const LIST_BODY: &str = r#"{
    "page": 1,
    "results": [
        {
            "id": 414906,
            "title": "The Batman",
            "release_date": "2022-03-01",
            "overview": "Batman ventures into Gotham",
            "poster_path": "/74xTEgt7R36Fpooo50r9T25onhq.jpg",
            "backdrop_path": null,
            "vote_average": 7.8,
            "vote_count": 9000,
            "genre_ids": [80, 9648]
        },
        {
            "id": 268,
            "title": "Batman",
            "release_date": "1989-06-23",
            "overview": null,
            "poster_path": null,
            "vote_average": 7.2,
            "vote_count": 7000
        }
    ],
    "total_results": 2,
    "total_pages": 1
}"#;

// =============================================================================
// Listing Tests
// =============================================================================

#[tokio::test]
async fn test_popular_movies_parses_page() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("api_key".into(), "test_key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LIST_BODY)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let page = client.popular_movies(1).await.unwrap();

    mock.assert_async().await;

    assert_eq!(page.page, 1);
    assert_eq!(page.total_results, 2);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].title, "The Batman");
    assert_eq!(page.results[0].year(), Some(2022));
    assert_eq!(page.results[1].overview, "");
    assert!(page.results[1].poster_path.is_none());
}

#[tokio::test]
async fn test_page_zero_is_clamped_to_first_page() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(LIST_BODY)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    client.popular_movies(0).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_encodes_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "the batman & robin".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(LIST_BODY)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let page = client.search_movies("the batman & robin", 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.results.len(), 2);
}

// =============================================================================
// Detail Tests
// =============================================================================

#[tokio::test]
async fn test_movie_details_parses_full_payload() {
    let mut server = Server::new_async().await;

    let body = r#"{
        "id": 361743,
        "title": "Top Gun: Maverick",
        "overview": "After more than thirty years of service...",
        "poster_path": "/62HCnUTziyWcpDaBO2i1DX17ljH.jpg",
        "backdrop_path": "/odJ4hx6g6vBt4lBWKFD1tI8WS4x.jpg",
        "release_date": "2022-05-24",
        "vote_average": 8.3,
        "vote_count": 7500,
        "runtime": 131,
        "budget": 170000000,
        "revenue": 1488732821,
        "genres": [{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}],
        "production_companies": [
            {"id": 4, "name": "Paramount", "logo_path": "/gz66EfNoYPqHTYI4q9UEN4CbHRc.png"},
            {"id": 82819, "name": "Skydance", "logo_path": null}
        ],
        "credits": {"cast": [], "crew": []}
    }"#;

    let mock = server
        .mock("GET", "/movie/361743")
        .match_query(Matcher::UrlEncoded(
            "append_to_response".into(),
            "credits".into(),
        ))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let movie = client.movie_details(361743).await.unwrap();

    mock.assert_async().await;

    assert_eq!(movie.title, "Top Gun: Maverick");
    assert_eq!(movie.runtime, Some(131));
    assert_eq!(movie.budget, Some(170_000_000));
    assert_eq!(movie.genre_names(), vec!["Action", "Drama"]);
    let companies = movie.production_companies.unwrap();
    assert_eq!(companies.len(), 2);
    assert!(companies[1].logo_path.is_none());
}

// =============================================================================
// Auth Tests
// =============================================================================

#[tokio::test]
async fn test_long_key_sent_as_bearer_token() {
    let mut server = Server::new_async().await;
    let token = "eyJ".to_string() + &"a".repeat(80);

    let mock = server
        .mock("GET", "/movie/popular")
        .match_header("authorization", format!("Bearer {}", token).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(LIST_BODY)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(token.clone(), server.url());
    client.popular_movies(1).await.unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_not_found() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/movie/999999999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status_code": 34, "status_message": "The resource you requested could not be found."}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let err = client.movie_details(999999999).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::NotFound)
    ));
}

#[tokio::test]
async fn test_server_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let err = client.popular_movies(1).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::ServerError(503))
    ));
}

#[tokio::test]
async fn test_invalid_json() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let err = client.search_movies("dune", 1).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_rate_limit_retries_then_succeeds() {
    let mut server = Server::new_async().await;

    let limited = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("Retry-After", "0")
        .expect(1)
        .create_async()
        .await;
    let ok = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(LIST_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url());
    let page = client.popular_movies(1).await.unwrap();

    limited.assert_async().await;
    ok.assert_async().await;
    assert_eq!(page.results.len(), 2);
}

#[tokio::test]
async fn test_rate_limit_gives_up() {
    let mut server = Server::new_async().await;

    let limited = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("Retry-After", "0")
        .expect(2)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url("test_key", server.url()).with_max_retries(2);
    let err = client.popular_movies(1).await.unwrap_err();

    limited.assert_async().await;
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::RateLimited)
    ));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let client = CatalogClient::with_base_url("test_key", "http://127.0.0.1:9");
    let err = client.popular_movies(1).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::RequestFailed(_))
    ));
}
