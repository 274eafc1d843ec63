use crate::clip::AudioClip;
use crate::config_loader::Settings;
use crate::error::SynthesisError;
use crate::request::SpeechRequest;
use serde_json::Value;
use std::time::Duration;

/// Blocking client for the provider's `/audio/speech` endpoint.
/// One request per synthesis; no retry or backoff, the caller decides
/// whether to try again.
pub struct SynthesisClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SynthesisClient {
    pub fn new(settings: &Settings) -> Result<Self, SynthesisError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Performs a single synthesis call and returns the raw MP3 payload.
    /// A missing credential fails before any network traffic.
    pub fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, SynthesisError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(SynthesisError::MissingCredential)?;

        let response = self
            .http
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(api_key)
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SynthesisError::Provider {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        let bytes = response.bytes()?;
        Ok(AudioClip::new(bytes.to_vec()))
    }
}

/// Extracts the human-readable message from the provider's error envelope
/// (`{"error": {"message": ...}}`), falling back to the raw body.
fn provider_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
    }
    if body.is_empty() {
        "no error details from provider".to_string()
    } else {
        body.to_string()
    }
}
