//! services/client/src/adapters/translate.rs
//!
//! This module contains the adapter for the public translation endpoint.
//! It implements the `TranslationService` port from the `core` crate.
//!
//! The endpoint is unauthenticated and best-effort; per-unit degradation on
//! failure is the orchestrator's responsibility, not this adapter's.

use async_trait::async_trait;
use smartchef_core::domain::Locale;
use smartchef_core::ports::{PortError, PortResult, TranslationService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `TranslationService` port against the
/// free `gtx` translation endpoint.
#[derive(Clone)]
pub struct GtxTranslateAdapter {
    http: reqwest::Client,
    endpoint: String,
}

impl GtxTranslateAdapter {
    /// Creates a new `GtxTranslateAdapter`.
    pub fn new(http: reqwest::Client, endpoint: String) -> Self {
        Self { http, endpoint }
    }
}

//=========================================================================================
// `TranslationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TranslationService for GtxTranslateAdapter {
    async fn translate(&self, text: &str, source: Locale, target: Locale) -> PortResult<String> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Network(format!(
                "translation endpoint answered {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(collect_segments(&payload))
    }
}

/// The endpoint answers with nested arrays where `payload[0]` holds one
/// `[translated, original, ...]` entry per input segment; the full
/// translation is the concatenation of each entry's first element.
fn collect_segments(payload: &serde_json::Value) -> String {
    let mut translated = String::new();
    if let Some(segments) = payload.get(0).and_then(|v| v.as_array()) {
        for segment in segments {
            if let Some(text) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(text);
            }
        }
    }
    translated
}
