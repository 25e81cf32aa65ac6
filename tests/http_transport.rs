//! Exercises the HTTP transport against a local mock server.
//!
//! The transport is blocking, so every call runs on tokio's blocking pool.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shoplogistics::{
    args, config::DEFAULT_USER_AGENT, AnswerError, ApiClient, ClientConfig, Credentials,
    Environment, Error, HttpTransport, Transport, TransportError,
};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> Url {
    Url::parse(&format!("{}/index.php?route=deliveries/api", server.uri()))
        .expect("mock server URI should be valid")
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/index.php"))
        .and(query_param("route", "deliveries/api"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// The decoded `xml` form field of the only request the server received.
async fn posted_document(server: &MockServer) -> String {
    let requests = server.received_requests().await.expect("recording is enabled");
    assert_eq!(requests.len(), 1);

    let encoded = url::form_urlencoded::parse(&requests[0].body)
        .find(|(key, _)| key == "xml")
        .map(|(_, value)| value.into_owned())
        .expect("request should carry the xml field");
    String::from_utf8(STANDARD.decode(encoded).expect("field should be base64"))
        .expect("document should be UTF-8")
}

#[tokio::test]
async fn posts_base64_form_field_and_returns_body() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string("<answer><error>0</error></answer>"),
    )
    .await;

    let url = endpoint(&server);
    let body = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&ClientConfig::default())?;
        transport.post(&url, "xml", b"<request><function>ping</function></request>")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(body, b"<answer><error>0</error></answer>");
    assert_eq!(
        posted_document(&server).await,
        "<request><function>ping</function></request>"
    );

    let requests = server.received_requests().await.unwrap();
    let user_agent = requests[0].headers.get("user-agent").unwrap();
    assert_eq!(user_agent.to_str().unwrap(), DEFAULT_USER_AGENT);
}

#[tokio::test]
async fn non_success_status_keeps_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(503).set_body_string("maintenance")).await;

    let url = endpoint(&server);
    let result = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&ClientConfig::default())?;
        transport.post(&url, "xml", b"<request/>")
    })
    .await
    .unwrap();

    match result {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_string("<answer><error>0</error></answer>")
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let url = endpoint(&server);
    let result = tokio::task::spawn_blocking(move || {
        let config = ClientConfig::default().with_timeout(Some(Duration::from_millis(200)));
        let transport = HttpTransport::new(&config)?;
        transport.post(&url, "xml", b"<request/>")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(TransportError::Request(_))));
}

#[tokio::test]
async fn client_round_trip_through_http() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <answer><error>0</error><partners><partner><id>5</id></partner></partners></answer>",
        ),
    )
    .await;

    let config = ClientConfig::default().with_endpoint(endpoint(&server));
    let answer = tokio::task::spawn_blocking(move || {
        let credentials = Credentials::new("testkey", Environment::Prod)?;
        let client = ApiClient::with_config(credentials, config)?;
        client.call_method(
            "get_all_couriers_partners",
            &args! { "from_city_code" => 1, "to_city_code" => None::<i64> },
        )
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(answer.error_code(), Some(0));
    assert_eq!(
        answer.lookup(&["partners", "partner", "id"]).unwrap(),
        "5"
    );
    assert_eq!(
        posted_document(&server).await,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <request><function>get_all_couriers_partners</function><api_id>testkey</api_id>\
         <from_city_code>1</from_city_code><to_city_code/></request>"
    );
}

#[tokio::test]
async fn client_reports_http_failures_as_answer_errors() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let config = ClientConfig::default().with_endpoint(endpoint(&server));
    let result = tokio::task::spawn_blocking(move || {
        let credentials = Credentials::new("testkey", Environment::Test)?;
        let client = ApiClient::with_config(credentials, config)?;
        client.call_method("get_dictionary", &args! { "dictionary_type" => "city" })
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(Error::Answer(AnswerError::Transport(TransportError::Status { status: 500, .. })))
    ));
}
