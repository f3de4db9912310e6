use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::Transcriber;
use crate::config::TranscriberConfig;
use crate::error::{CapsubError, Result};
use crate::transcript::{Transcript, TranscriptSegment};

/// Whisper CLI JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    pub text: String,
    pub segments: Vec<WhisperSegment>,
    pub language: Option<String>,
}

/// Whisper CLI segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub id: u64,
    pub seek: Option<u64>,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub tokens: Option<Vec<i32>>,
    pub temperature: Option<f64>,
    pub avg_logprob: Option<f64>,
    pub compression_ratio: Option<f64>,
    pub no_speech_prob: Option<f64>,
}

impl From<WhisperOutput> for Transcript {
    fn from(output: WhisperOutput) -> Self {
        let segments: Vec<TranscriptSegment> = output
            .segments
            .into_iter()
            .map(|seg| TranscriptSegment {
                id: seg.id as i32,
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect();

        Transcript {
            text: output.text.trim().to_string(),
            segments,
            language: output.language.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Transcriber backed by the OpenAI Whisper command-line tool
pub struct WhisperTranscriber {
    config: TranscriberConfig,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    /// Execute transcription and parse the JSON the tool writes into its
    /// output directory.
    async fn execute_transcription(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<Transcript> {
        debug!(
            "Executing whisper transcription with model: {}",
            self.config.model
        );

        // Whisper writes one output file per format into the output directory
        let temp_dir = tempfile::tempdir()
            .map_err(|e| CapsubError::Transcriber(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg(audio_path)
            .arg("--model")
            .arg(&self.config.model)
            .arg("--output_dir")
            .arg(output_dir)
            .arg("--output_format")
            .arg("json")
            .arg("--temperature")
            .arg(self.config.temperature.to_string());

        if !self.config.fp16 {
            cmd.arg("--fp16").arg("False");
        }

        if let Some(lang) = language {
            cmd.arg("--language").arg(lang);
        }

        let output = cmd
            .output()
            .map_err(|e| CapsubError::Transcriber(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CapsubError::Transcriber(format!(
                "Whisper transcription failed: {}",
                stderr
            )));
        }

        let audio_filename = audio_path
            .file_stem()
            .ok_or_else(|| CapsubError::Transcriber("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_filename.to_string_lossy()));

        if !json_file.exists() {
            return Err(CapsubError::Transcriber(
                "Whisper JSON output file not found".to_string(),
            ));
        }

        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| CapsubError::Transcriber(format!("Failed to read JSON output: {}", e)))?;

        let whisper_output: WhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| CapsubError::Transcriber(format!("Failed to parse whisper JSON: {}", e)))?;

        Ok(whisper_output.into())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe<'a>(
        &self,
        audio_path: &Path,
        language: Option<&'a str>,
    ) -> Result<Transcript> {
        info!("Transcribing audio file: {}", audio_path.display());

        let transcript = self.execute_transcription(audio_path, language).await?;

        info!(
            "Transcription completed: {} segments, detected language '{}'",
            transcript.segments.len(),
            transcript.language
        );
        Ok(transcript)
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("--help")
            .output()
            .map_err(|e| {
                CapsubError::Transcriber(format!(
                    "whisper command not found ({}). Install with: pip install openai-whisper",
                    e
                ))
            })?;

        if output.status.success() {
            info!("Whisper command-line tool is available");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(CapsubError::Transcriber(format!(
                "Whisper availability check failed: {}",
                stderr
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whisper_output_maps_to_transcript() {
        let json = r#"{
            "text": " Hello there. General Kenobi.",
            "segments": [
                {
                    "id": 0,
                    "seek": 0,
                    "start": 0.0,
                    "end": 1.5,
                    "text": " Hello there.",
                    "tokens": [50364, 2425],
                    "temperature": 0.0,
                    "avg_logprob": -0.25,
                    "compression_ratio": 1.2,
                    "no_speech_prob": 0.01
                },
                {
                    "id": 1,
                    "seek": 0,
                    "start": 1.5,
                    "end": 3.2,
                    "text": " General Kenobi.",
                    "tokens": [50440],
                    "temperature": 0.0,
                    "avg_logprob": -0.3,
                    "compression_ratio": 1.1,
                    "no_speech_prob": 0.02
                }
            ],
            "language": "en"
        }"#;

        let output: WhisperOutput = serde_json::from_str(json).unwrap();
        let transcript: Transcript = output.into();

        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].text, "Hello there.");
        assert_eq!(transcript.segments[1].start, 1.5);
        assert_eq!(transcript.text, "Hello there. General Kenobi.");
    }

    #[test]
    fn test_whisper_output_without_optional_fields() {
        let json = r#"{
            "text": "bonjour",
            "segments": [
                {"id": 0, "start": 0.0, "end": 0.8, "text": " bonjour"}
            ],
            "language": "fr"
        }"#;

        let output: WhisperOutput = serde_json::from_str(json).unwrap();
        let transcript: Transcript = output.into();

        assert_eq!(transcript.language, "fr");
        assert_eq!(transcript.segments[0].text, "bonjour");
    }

    #[test]
    fn test_missing_language_falls_back_to_unknown() {
        let output = WhisperOutput {
            text: "hi".to_string(),
            segments: vec![],
            language: None,
        };
        let transcript: Transcript = output.into();
        assert_eq!(transcript.language, "unknown");
    }
}
