// Contract tests for the HTTP service clients, backed by mockito

use pocketplan::models::{Coordinates, VenueTag};
use pocketplan::services::{GeoapifyClient, WeatherClient};

fn geoapify_client(base_url: String) -> GeoapifyClient {
    GeoapifyClient::new(base_url, "test_key".to_string(), 100, 60, 5000, 15)
}

fn coords() -> Coordinates {
    Coordinates {
        lat: 52.52,
        lon: 13.405,
    }
}

#[tokio::test]
async fn test_geocode_parses_first_feature() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/geocode/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"features":[{"properties":{"lat":52.52,"lon":13.405}}]}"#)
        .create_async()
        .await;

    let client = geoapify_client(server.url());
    let result = client.geocode("Berlin").await.unwrap();

    let coords = result.expect("coordinates");
    assert_eq!(coords.lat, 52.52);
    assert_eq!(coords.lon, 13.405);
}

#[tokio::test]
async fn test_geocode_empty_features_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/geocode/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"features":[]}"#)
        .create_async()
        .await;

    let client = geoapify_client(server.url());
    let result = client.geocode("Atlantis").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_geocode_error_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/geocode/search")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = geoapify_client(server.url());
    assert!(client.geocode("Berlin").await.is_err());
}

#[tokio::test]
async fn test_geocode_caches_successful_lookups() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/geocode/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"features":[{"properties":{"lat":52.52,"lon":13.405}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = geoapify_client(server.url());
    let first = client.geocode("Berlin").await.unwrap();
    // Same query, different casing: served from cache
    let second = client.geocode("  BERLIN ").await.unwrap();

    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_places_decodes_venues() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/places")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"features":[
                {"properties":{"name":"Corner Cafe","distance":420,"categories":["catering.cafe"]}},
                {"properties":{"distance":900,"categories":["leisure.park"]}}
            ]}"#,
        )
        .create_async()
        .await;

    let client = geoapify_client(server.url());
    let venues = client
        .search_places(coords(), "catering.cafe,leisure.park")
        .await
        .unwrap();

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].name, "Corner Cafe");
    assert_eq!(venues[0].tags, vec![VenueTag::Cafe]);
    // Missing name defaults
    assert_eq!(venues[1].name, "Unknown Place");
    assert_eq!(venues[1].distance_m, 900.0);
}

#[tokio::test]
async fn test_search_places_malformed_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/places")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results":[]}"#)
        .create_async()
        .await;

    let client = geoapify_client(server.url());
    assert!(client.search_places(coords(), "catering.cafe").await.is_err());
}

#[tokio::test]
async fn test_weather_parses_current_conditions() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"main":{"temp":12.3},"weather":[{"main":"Rain","description":"light rain"}]}"#,
        )
        .create_async()
        .await;

    let client = WeatherClient::new(server.url(), "test_key".to_string());
    let reading = client.current(coords()).await.unwrap();

    assert_eq!(reading.temp_c, 12.3);
    assert_eq!(reading.condition, "Rain");
    assert_eq!(reading.description, "light rain");
}

#[tokio::test]
async fn test_weather_failure_substitutes_default() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = WeatherClient::new(server.url(), "test_key".to_string());
    let reading = client.current_or_default(coords()).await;

    assert_eq!(reading.temp_c, 20.0);
    assert_eq!(reading.condition, "Clear");
}

#[tokio::test]
async fn test_weather_malformed_body_substitutes_default() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected":true}"#)
        .create_async()
        .await;

    let client = WeatherClient::new(server.url(), "test_key".to_string());
    let reading = client.current_or_default(coords()).await;

    assert_eq!(reading.condition, "Clear");
}
