//! Integration tests for HttpWeatherSource and the home page pipeline
//! against a mock `/api/weather`.

use chrono::NaiveDate;
use outfit_core::{
    Config, FetchError, HttpWeatherSource, Slot, WeatherSource, page::HomePage,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_payload() -> serde_json::Value {
    serde_json::json!({
        "now": {"temp": 21.4, "hum": 60, "wind": 1.8, "pop": 10, "cond_text": "맑음", "icon": "sunny"},
        "feels_c": 22,
        "tomorrow": {"hi": 24, "low": 17, "pop": 70, "cond_text": "비", "icon": "rain"},
        "air_tip_text": "좋음",
        "outfit_text": "셔츠\n슬랙스",
        "tomorrow_tip_text": null
    })
}

#[tokio::test]
async fn test_fetch_success_sends_no_cache_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(header("cache-control", "no-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = HttpWeatherSource::new(&mock_server.uri());
    let payload = source.fetch().await.unwrap();

    let now = payload.now.unwrap();
    assert_eq!(now.temp, Some(21.4));
    assert_eq!(now.cond_text.as_deref(), Some("맑음"));
    assert_eq!(payload.tomorrow.unwrap().pop, Some(70.0));
    assert_eq!(payload.tomorrow_tip_text, None);
}

#[tokio::test]
async fn test_fetch_server_error_is_status_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let source = HttpWeatherSource::new(&mock_server.uri());
    let err = source.fetch().await.unwrap_err();

    match &err {
        FetchError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_fetch_error_status_ignores_valid_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_json(sample_payload()))
        .mount(&mock_server)
        .await;

    let source = HttpWeatherSource::new(&mock_server.uri());
    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_non_json_is_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let source = HttpWeatherSource::new(&mock_server.uri());
    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_unreachable_is_network_failure() {
    // Nothing listens on port 9 of localhost in the test environment.
    let source = HttpWeatherSource::new("http://127.0.0.1:9");
    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn test_home_page_renders_from_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.set_base_url(&mock_server.uri()).unwrap();
    let page = HomePage::new(HttpWeatherSource::new(config.base_url()), &config);

    page.refresh_on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()).await.unwrap();
    let slots = page.snapshot();

    assert_eq!(slots.text(Slot::TempText), Some("21°C"));
    assert_eq!(slots.text(Slot::FeelsText), Some("체감온도 22°C"));
    assert_eq!(slots.text(Slot::TomorrowTempText), Some("24°C / 17°C"));
    assert_eq!(slots.text(Slot::OutfitText), Some("셔츠<br/>슬랙스"));
    assert_eq!(slots.text(Slot::WeatherIcon), Some("/static/img/icons/sunny.png"));
}
