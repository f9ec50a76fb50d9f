use stooq_api::{previous_close, Client, Error};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn fetch_intraday_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("intraday_aapl.csv");

    Mock::given(method("GET"))
        .and(path("/q/l/"))
        .and(query_param("s", "aapl.us"))
        .and(query_param("f", "sd2t2ohlcv"))
        .and(query_param("e", "csv"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let row = client.fetch_intraday("AAPL").await.unwrap();

    assert_eq!(row.symbol, "AAPL.US");
    assert_eq!(row.close, Some(150.25));
    assert_eq!(row.open, Some(148.0));
    assert_eq!(row.high, Some(151.0));
    assert_eq!(row.low, Some(147.5));
    assert_eq!(row.volume, Some(1_200_000));
}

#[tokio::test]
async fn fetch_intraday_keeps_class_separator() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/q/l/"))
        .and(query_param("s", "brk.b.us"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Symbol,Date,Time,Open,High,Low,Close,Volume\nBRK.B.US,2024-06-14,22:00:08,405,409,404,408.5,3100000\n",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let row = client.fetch_intraday("BRK.B").await.unwrap();
    assert_eq!(row.close, Some(408.5));
}

#[tokio::test]
async fn fetch_intraday_unknown_symbol() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("intraday_unknown.csv");

    Mock::given(method("GET"))
        .and(path("/q/l/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_intraday("ZZZZ").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(!err.is_upstream());
}

#[tokio::test]
async fn fetch_intraday_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/q/l/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_intraday("AAPL").await.unwrap_err();
    match &err {
        Error::HttpStatus { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_upstream());
    assert_eq!(err.to_string(), "Feed request failed (503)");
}

#[tokio::test]
async fn fetch_intraday_connection_refused() {
    // Nothing listens on the discard port.
    let client = Client::with_base_url("http://127.0.0.1:9").unwrap();
    let err = client.fetch_intraday("AAPL").await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed(_)));
}

#[tokio::test]
async fn fetch_daily_history_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("daily_aapl.csv");

    Mock::given(method("GET"))
        .and(path("/q/d/l/"))
        .and(query_param("s", "AAPL.US"))
        .and(query_param("i", "d"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let rows = client.fetch_daily_history("AAPL").await.unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].date, "2024-06-10");
    assert_eq!(rows[4].close, Some(150.25));
    assert_eq!(previous_close(&rows).unwrap(), 148.0);
}

#[tokio::test]
async fn fetch_daily_history_insufficient() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("daily_short.csv");

    Mock::given(method("GET"))
        .and(path("/q/d/l/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_daily_history("AAPL").await.unwrap_err();
    assert!(matches!(err, Error::InsufficientHistory));
}

#[tokio::test]
async fn fetch_daily_history_not_found_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/q/d/l/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_daily_history("AAPL").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn fetch_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/q/l/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("intraday_aapl.csv"))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_timeout(&mock_server.uri(), std::time::Duration::from_millis(50))
        .unwrap();
    let err = client.fetch_intraday("AAPL").await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed(_)));
}
