use kurs::engine::{PriceEngine, Reply};
use kurs::providers::cbr::CbrProvider;
use std::fs;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const DAILY_RATES_BODY: &str = r#"{
        "Date": "2026-08-07T11:30:00+03:00",
        "Valute": {
            "USD": {"CharCode": "USD", "Nominal": 1, "Name": "US Dollar", "Value": 90.0},
            "EUR": {"CharCode": "EUR", "Nominal": 1, "Name": "Euro", "Value": 100.0}
        }
    }"#;

    pub async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/daily_json.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

#[test_log::test(tokio::test)]
async fn test_engine_full_query_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(test_utils::DAILY_RATES_BODY).await;
    let engine = PriceEngine::new(CbrProvider::new(&mock_server.uri()));

    assert_eq!(engine.get_price("usd").await.unwrap(), Reply::Price(90.0));
    assert_eq!(
        engine.get_price("10 usd").await.unwrap(),
        Reply::Price(900.0)
    );
    assert_eq!(
        engine.get_price("usd eur").await.unwrap(),
        Reply::Price(0.9)
    );
    assert_eq!(
        engine.get_price("10 usd rub").await.unwrap(),
        Reply::Price(900.0)
    );
    assert_eq!(
        engine.get_price("10 usd eur").await.unwrap(),
        Reply::Price(9.0)
    );
}

#[test_log::test(tokio::test)]
async fn test_grammar_failure_never_contacts_the_source() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/daily_json.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string(test_utils::DAILY_RATES_BODY))
        .expect(0)
        .mount(&mock_server)
        .await;

    let engine = PriceEngine::new(CbrProvider::new(&mock_server.uri()));
    let reply = engine.get_price("1 2 3 4").await.expect("query failed");

    match reply {
        Reply::Invalid(message) => assert!(message.contains("got 4")),
        Reply::Price(price) => panic!("expected a rejection, got {price}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_unknown_currency_reply_lists_the_snapshot() {
    let mock_server = test_utils::create_mock_server(test_utils::DAILY_RATES_BODY).await;
    let engine = PriceEngine::new(CbrProvider::new(&mock_server.uri()));

    let reply = engine.get_price("xxx").await.expect("query failed");
    match reply {
        Reply::Invalid(message) => {
            assert!(message.contains("\"XXX\""));
            assert!(message.contains("USD: US Dollar"));
            assert!(message.contains("EUR: Euro"));
            assert!(message.contains("RUB: Russian Ruble"));
        }
        Reply::Price(price) => panic!("expected a rejection, got {price}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_source_failure_propagates() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/daily_json.js"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let engine = PriceEngine::new(CbrProvider::new(&mock_server.uri()));
    let result = engine.get_price("10 usd").await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_config_file() {
    let mock_server = test_utils::create_mock_server(test_utils::DAILY_RATES_BODY).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
providers:
  cbr:
    base_url: {}
"#,
        mock_server.uri()
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = kurs::run_command(
        kurs::AppCommand::Price("10 USD".to_string()),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    let result = kurs::run_command(
        kurs::AppCommand::Values,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_usage_command_needs_no_source() {
    let result = kurs::run_command(kurs::AppCommand::Usage, None).await;
    assert!(result.is_ok());
}
