//! Integration tests for OpenWeatherProvider using wiremock.

use weather_core::{
    IconRef, LookupError, WeatherProvider, WeatherReport,
    provider::openweather::OpenWeatherProvider,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_payload(name: &str, icon: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": icon }],
        "main": { "temp": temp, "feels_like": temp, "humidity": 55 },
        "wind": { "speed": 4.2, "deg": 120 },
        "name": name,
        "cod": 200
    })
}

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(&server.uri(), "TEST_KEY".to_string()).unwrap()
}

#[tokio::test]
async fn test_current_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Dubai"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_payload("Dubai", "01d", 23.7)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = provider.current("Dubai").await.unwrap();

    assert_eq!(
        report,
        WeatherReport {
            temperature: 23,
            humidity: 55,
            wind_speed: 4.2,
            location: "Dubai".to_string(),
            icon: IconRef::Clear,
        }
    );
}

#[tokio::test]
async fn test_current_rain_icon() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_payload("London", "10d", 11.2)),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = provider.current("London").await.unwrap();

    assert_eq!(report.icon, IconRef::Rain);
    assert_eq!(report.temperature, 11);
}

#[tokio::test]
async fn test_city_with_spaces_is_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "New York"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_payload("New York", "50d", 5.0)),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = provider.current("New York").await.unwrap();

    assert_eq!(report.location, "New York");
    assert_eq!(report.icon, IconRef::Clear);
}

#[tokio::test]
async fn test_not_found_is_invalid_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.current("Atlantis").await.unwrap_err();

    assert!(matches!(err, LookupError::InvalidLocation));
    assert!(err.user_message().contains("valid location"));
}

/// Serves one response whose body is shorter than its `Content-Length`.
async fn serve_truncated(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{{\"cod\":"
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_not_found_with_truncated_body_is_invalid_location() {
    let uri = serve_truncated("404 Not Found").await;

    let provider = OpenWeatherProvider::new(&uri, "TEST_KEY".to_string()).unwrap();
    let err = provider.current("Atlantis").await.unwrap_err();

    assert!(matches!(err, LookupError::InvalidLocation), "got {err:?}");
}

#[tokio::test]
async fn test_unauthorized_with_truncated_body_is_invalid_credential() {
    let uri = serve_truncated("401 Unauthorized").await;

    let provider = OpenWeatherProvider::new(&uri, "TEST_KEY".to_string()).unwrap();
    let err = provider.current("Dubai").await.unwrap_err();

    assert!(matches!(err, LookupError::InvalidCredential), "got {err:?}");
}

#[tokio::test]
async fn test_fractional_humidity_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{ "icon": "04n" }],
            "main": { "temp": 9.9, "humidity": 55.0 },
            "wind": { "speed": 6.1 },
            "name": "Hamburg"
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = provider.current("Hamburg").await.unwrap();

    assert_eq!(report.humidity, 55);
    assert_eq!(report.temperature, 9);
    assert_eq!(report.icon, IconRef::Drizzle);
}

#[tokio::test]
async fn test_condition_without_icon_falls_back_to_clear() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{ "id": 800 }],
            "main": { "temp": 30.0, "humidity": 20 },
            "wind": { "speed": 1.0 },
            "name": "Dubai"
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = provider.current("Dubai").await.unwrap();

    assert_eq!(report.icon, IconRef::Clear);
}

#[tokio::test]
async fn test_missing_conditions_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": 30.0, "humidity": 20 },
            "wind": { "speed": 1.0 },
            "name": "Dubai"
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.current("Dubai").await.unwrap_err();

    assert!(matches!(err, LookupError::Decode(_)));
    assert!(err.user_message().contains("error occurred"));
}

#[tokio::test]
async fn test_unauthorized_is_invalid_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.current("Dubai").await.unwrap_err();

    assert!(matches!(err, LookupError::InvalidCredential));
    assert!(err.user_message().contains("API key"));
}

#[tokio::test]
async fn test_other_status_is_generic_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.current("Dubai").await.unwrap_err();

    assert!(matches!(err, LookupError::Http(status) if status.as_u16() == 503));
    assert!(err.user_message().contains("503"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.current("Dubai").await.unwrap_err();

    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let provider = OpenWeatherProvider::new(&uri, "TEST_KEY".to_string()).unwrap();
    let err = provider.current("Dubai").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport(_)));
    assert!(err.user_message().contains("error occurred"));
}
