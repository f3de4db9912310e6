use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::Translator;
use crate::config::TranslateConfig;
use crate::error::{CapsubError, Result};
use crate::transcript::Transcript;

/// Translator backed by the public Google translate endpoint.
///
/// The endpoint returns a nested JSON array rather than an object; the
/// translation is the concatenation of the first element of each chunk in
/// the outermost array's first entry.
pub struct GoogleTranslator {
    client: Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    /// Translate a single piece of text to the target language.
    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.config.endpoint);

        debug!("Sending translation request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| CapsubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CapsubError::Translation(format!(
                "Translation API error {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CapsubError::Translation(format!("Failed to parse response: {}", e)))?;

        if let Some(detected) = body.get(2).and_then(Value::as_str) {
            debug!("Detected source language: {}", detected);
        }

        parse_translation(&body)
    }
}

/// Extract the translated text from the nested-array response body.
fn parse_translation(body: &Value) -> Result<String> {
    let chunks = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| CapsubError::Translation("Unexpected response shape".to_string()))?;

    let mut translation = String::new();
    for chunk in chunks {
        if let Some(piece) = chunk.get(0).and_then(Value::as_str) {
            translation.push_str(piece);
        }
    }

    let translation = translation.trim().to_string();
    if translation.is_empty() {
        return Err(CapsubError::Translation(
            "Empty translation received".to_string(),
        ));
    }

    Ok(translation)
}

#[async_trait]
impl Translator for GoogleTranslator {
    /// Translate each segment individually, in order. A segment that fails
    /// to translate keeps its original text.
    async fn translate_transcript(
        &self,
        transcript: &mut Transcript,
        target_language: &str,
    ) -> Result<()> {
        info!("Starting translation to {}", target_language);

        let total_segments = transcript.segments.len();

        for (idx, segment) in transcript.segments.iter_mut().enumerate() {
            if segment.text.trim().is_empty() {
                continue;
            }

            info!("Translating segment {}/{}", idx + 1, total_segments);
            debug!("Source: {}", segment.text);

            match self.translate_text(&segment.text, target_language).await {
                Ok(translation) => {
                    debug!("Target: {}", translation);
                    segment.text = translation;
                }
                Err(e) => {
                    warn!("Segment {} translation failed: {}", idx + 1, e);
                    // Keep original text on failure
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_single_chunk() {
        let body = json!([[["Hola", "Hello", null, null, 10]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "Hola");
    }

    #[test]
    fn test_parse_translation_concatenates_chunks() {
        let body = json!([
            [
                ["Bonjour le monde. ", "Hello world. ", null, null, 10],
                ["Au revoir.", "Goodbye.", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(
            parse_translation(&body).unwrap(),
            "Bonjour le monde. Au revoir."
        );
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shape() {
        let body = json!({"error": "nope"});
        assert!(parse_translation(&body).is_err());
    }

    #[test]
    fn test_parse_translation_rejects_empty() {
        let body = json!([[], null, "en"]);
        assert!(parse_translation(&body).is_err());
    }
}
