//! SeamlessM4T translation over a local inference endpoint.

use crate::config::TranslatorConfig;
use crate::error::{Result, SubgenError};
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum retries for transient endpoint failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const BASE_DELAY_MS: u64 = 1000;

/// Translator backed by a SeamlessM4T inference server.
pub struct SeamlessTranslator {
    client: Client,
    endpoint: String,
}

impl SeamlessTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn translate_url(&self) -> String {
        format!("{}/translate", self.endpoint)
    }

    async fn call_api(&self, request: &TranslateRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(self.translate_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!("Translation endpoint response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            // The server reports model errors as {"error": "..."}
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(SubgenError::Translation(format!(
                    "Translation endpoint error ({status}): {}",
                    api_error.error
                )));
            }
            return Err(SubgenError::Translation(format!(
                "Translation endpoint error ({status}): {body}"
            )));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| SubgenError::Translation(format!("Invalid endpoint response: {e}")))?;

        Ok(parsed.translation_text)
    }

    /// Call the endpoint, retrying transient failures with backoff.
    ///
    /// 4xx responses are not retried; the request will not get better.
    async fn call_with_retry(&self, request: &TranslateRequest<'_>) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = BASE_DELAY_MS * 2u64.pow(attempt - 1);
                debug!("Retry attempt {} after {}ms delay", attempt, delay);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.call_api(request).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    // Don't retry on client errors
                    if e.to_string().contains("endpoint error (4") {
                        return Err(e);
                    }
                    warn!("Attempt {} failed: {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| SubgenError::Translation("Unknown endpoint error".to_string())))
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    src_lang: &'a str,
    tgt_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation_text: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: String,
}

#[async_trait]
impl Translator for SeamlessTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = TranslateRequest {
            text,
            src_lang: source_lang,
            tgt_lang: target_lang,
        };

        let translated = self.call_with_retry(&request).await?;
        Ok(translated.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "seamless-m4t"
    }
}
