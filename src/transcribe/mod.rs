// Transcription service abstraction
//
// The transcription model is invoked as a black box behind the Transcriber
// trait. The default implementation shells out to the OpenAI Whisper
// command-line tool and parses its JSON output.

pub mod whisper;

use async_trait::async_trait;
use std::path::Path;

use crate::config::TranscriberConfig;
use crate::error::Result;
use crate::transcript::Transcript;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file, detecting the spoken language unless a
    /// language hint is given.
    async fn transcribe<'a>(
        &self,
        audio_path: &Path,
        language: Option<&'a str>,
    ) -> Result<Transcript>;

    /// Check that the transcription tool is installed and runnable.
    fn check_availability(&self) -> Result<()>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create the default transcriber implementation (whisper CLI)
    pub fn create(config: TranscriberConfig) -> Box<dyn Transcriber> {
        Box::new(whisper::WhisperTranscriber::new(config))
    }
}
