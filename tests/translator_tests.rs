//! Tests for the SeamlessM4T translation client against a mock endpoint.

use subgen::config::TranslatorConfig;
use subgen::error::SubgenError;
use subgen::translate::{SeamlessTranslator, Translator};

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn translator_for(server: &MockServer) -> SeamlessTranslator {
    SeamlessTranslator::new(&TranslatorConfig {
        endpoint: server.uri(),
        timeout_secs: 5,
    })
    .expect("client creation")
}

#[tokio::test]
async fn test_translate_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({
            "text": "Ciao mondo",
            "src_lang": "it",
            "tgt_lang": "en",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translation_text": " Hello world "
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translator = translator_for(&server);
    let result = translator.translate("Ciao mondo", "it", "en").await.unwrap();

    assert_eq!(result, "Hello world");
}

#[tokio::test]
async fn test_translate_api_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "unsupported language pair"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translator = translator_for(&server);
    let result = translator.translate("Ciao", "it", "en").await;

    match result {
        Err(SubgenError::Translation(msg)) => {
            assert!(msg.contains("unsupported language pair"), "got: {msg}");
        }
        other => panic!("Expected Translation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_translate_retries_server_errors() {
    let server = MockServer::start().await;

    // First attempt fails, the retry succeeds
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translation_text": "Hello"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translator = translator_for(&server);
    let result = translator.translate("Ciao", "it", "en").await.unwrap();

    assert_eq!(result, "Hello");
}

#[tokio::test]
async fn test_translate_invalid_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let translator = translator_for(&server);
    let result = translator.translate("Ciao", "it", "en").await;

    match result {
        Err(SubgenError::Translation(msg)) => {
            assert!(msg.contains("Invalid endpoint response"), "got: {msg}");
        }
        other => panic!("Expected Translation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_text_never_hits_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translation_text": "should not be called"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let translator = translator_for(&server);
    let result = translator.translate("   ", "it", "en").await.unwrap();

    assert_eq!(result, "");
}
