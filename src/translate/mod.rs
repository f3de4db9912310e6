// Machine translation abstraction
//
// The translation service is a pre-existing HTTP API invoked as a black box
// behind the Translator trait. The default implementation talks to the
// public Google translate endpoint.

pub mod google;

use async_trait::async_trait;

use crate::config::TranslateConfig;
use crate::error::Result;
use crate::transcript::Transcript;

/// Main trait for translation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate every transcript segment to the target language in place.
    async fn translate_transcript(
        &self,
        transcript: &mut Transcript,
        target_language: &str,
    ) -> Result<()>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create the default translator implementation
    pub fn create(config: TranslateConfig) -> Box<dyn Translator> {
        Box::new(google::GoogleTranslator::new(config))
    }
}
