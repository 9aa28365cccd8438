//! Relay chain behaviour against local mock relays.

use std::time::Duration;

use folio_config::ProxyConfig;
use folio_fetch::{FetchError, ProxyChain};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE: &str = "https://www.researchgate.net/profile/Someone";

fn chain(endpoints: Vec<String>, timeout_secs: u64) -> ProxyChain {
    ProxyChain::from_config(&ProxyConfig {
        endpoints,
        timeout_secs,
        ..ProxyConfig::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn first_healthy_relay_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .and(query_param("url", PROFILE))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"contents":"<div>77 Citations</div>"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/second"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let chain = chain(
        vec![
            format!("{}/first?url=", server.uri()),
            format!("{}/second?url=", server.uri()),
        ],
        5,
    );

    let document = chain.fetch_remote_document(PROFILE).await.unwrap();
    assert_eq!(document, "<div>77 Citations</div>");
}

#[tokio::test]
async fn failing_relays_hand_over_in_order() {
    let server = MockServer::start().await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "5"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>1,243 Reads</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let chain = chain(
        vec![
            format!("{}/broken?url=", server.uri()),
            format!("{}/limited?url=", server.uri()),
            format!("{}/raw?url=", server.uri()),
        ],
        5,
    );

    let document = chain.fetch_remote_document(PROFILE).await.unwrap();
    assert_eq!(document, "<p>1,243 Reads</p>");
}

#[tokio::test]
async fn exhausted_chain_reports_every_attempt() {
    let server = MockServer::start().await;
    Mock::given(path("/a"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"contents":""}"#))
        .expect(1)
        .mount(&server)
        .await;

    let chain = chain(
        vec![
            format!("{}/a?url=", server.uri()),
            format!("{}/b?url=", server.uri()),
            "http://127.0.0.1:9/?".to_string(),
        ],
        5,
    );

    let err = chain.fetch_remote_document(PROFILE).await.unwrap_err();
    let FetchError::Exhausted { attempts } = err else {
        panic!("expected exhausted chain, got {err:?}");
    };
    assert_eq!(attempts.len(), 3);
    assert!(attempts[0].reason.contains("403"));
    assert!(attempts[1].reason.contains("empty document"));
    assert_eq!(attempts[2].endpoint, "http://127.0.0.1:9/?");
}

#[tokio::test]
async fn rate_limit_hint_is_kept_with_the_failed_attempt() {
    let server = MockServer::start().await;
    Mock::given(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let chain = chain(
        vec![
            format!("{}/limited?url=", server.uri()),
            format!("{}/down?url=", server.uri()),
        ],
        5,
    );

    let err = chain.fetch_remote_document(PROFILE).await.unwrap_err();
    let FetchError::Exhausted { attempts } = err else {
        panic!("expected exhausted chain, got {err:?}");
    };
    let hints: Vec<Option<u64>> = attempts.iter().map(|a| a.retry_after_secs).collect();
    assert_eq!(hints, vec![Some(7), None]);
    assert!(attempts[0].reason.contains("retry after 7s"));
}

#[tokio::test]
async fn slow_relay_times_out_and_next_is_tried() {
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>too late</p>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>23 Publications</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let chain = chain(
        vec![
            format!("{}/slow?url=", server.uri()),
            format!("{}/fast?url=", server.uri()),
        ],
        1,
    );

    let document = chain.fetch_remote_document(PROFILE).await.unwrap();
    assert_eq!(document, "<p>23 Publications</p>");
}
