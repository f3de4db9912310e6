use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{CapsubError, Result};
use crate::language;
use crate::media::{MediaProcessor, MediaProcessorFactory};
use crate::subtitle::{self, SubtitleFormat};
use crate::transcribe::{Transcriber, TranscriberFactory};
use crate::translate::{Translator, TranslatorFactory};

/// Result of a completed captioning run.
#[derive(Debug, Clone)]
pub struct CaptionOutput {
    /// Video file with the subtitles burned in.
    pub video_path: PathBuf,
    /// Subtitle file that was composited into the video.
    pub subtitle_path: PathBuf,
    /// Language the transcription model detected in the audio track.
    pub detected_language: String,
    /// Whether the transcript was machine-translated before serialization.
    pub translated: bool,
}

pub struct Workflow {
    transcriber: Box<dyn Transcriber>,
    translator: Box<dyn Translator>,
    media: Box<dyn MediaProcessor>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let transcriber = TranscriberFactory::create(config.transcriber.clone());
        let translator = TranslatorFactory::create(config.translate.clone());
        let media = MediaProcessorFactory::create(config.media.clone());

        // Check external tool dependencies up front
        media.check_availability()?;
        transcriber.check_availability()?;

        Ok(Self {
            transcriber,
            translator,
            media,
        })
    }

    /// Assemble a workflow from pre-built components.
    pub fn with_components(
        transcriber: Box<dyn Transcriber>,
        translator: Box<dyn Translator>,
        media: Box<dyn MediaProcessor>,
    ) -> Self {
        Self {
            transcriber,
            translator,
            media,
        }
    }

    /// Run the captioning pipeline over a single video file: transcribe its
    /// audio track, translate the transcript when the detected language
    /// differs from the requested one, serialize the subtitles, and burn
    /// them into the video.
    pub async fn caption_video<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        caption_language: &str,
        format: SubtitleFormat,
        output_dir: Option<Q>,
    ) -> Result<CaptionOutput> {
        let input_path = input_path.as_ref();
        info!("Captioning video file: {}", input_path.display());

        if !input_path.exists() {
            return Err(CapsubError::FileNotFound(input_path.display().to_string()));
        }

        let target_language = language::code_for(caption_language).ok_or_else(|| {
            CapsubError::UnsupportedLanguage(format!(
                "'{}' is not a supported caption language",
                caption_language
            ))
        })?;

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_path
                .parent()
                .ok_or_else(|| CapsubError::Config("Cannot determine output directory".to_string()))?
                .to_path_buf(),
        };
        fs::create_dir_all(&output_dir).await?;

        let video_stem = input_path
            .file_stem()
            .ok_or_else(|| CapsubError::Config("Invalid video filename".to_string()))?
            .to_string_lossy();

        // Intermediate audio lives in a uniquely named temp dir that is
        // removed when the workdir handle drops
        let workdir = tempfile::tempdir()?;
        let audio_path = workdir.path().join(format!("{}.wav", Uuid::new_v4()));

        // Step 1: Extract the audio track and transcribe it
        let spinner = step_spinner("Extracting audio track...");
        self.media.extract_audio(input_path, &audio_path).await?;
        spinner.finish_with_message("Audio track extracted");

        let spinner = step_spinner("Transcribing video file...");
        let mut transcript = self.transcriber.transcribe(&audio_path, None).await?;
        spinner.finish_with_message(format!(
            "Transcribed {} segments (detected language: {})",
            transcript.segments.len(),
            transcript.language
        ));

        let detected_language = transcript.language.clone();
        info!("Detected video language: {}", detected_language);

        // Step 2: Translate segment by segment when the detected language
        // differs from the requested caption language
        let translated = detected_language != target_language;
        if translated {
            let spinner = step_spinner(format!(
                "Translating transcript to '{}'...",
                language::name_for(target_language).unwrap_or(target_language)
            ));
            self.translator
                .translate_transcript(&mut transcript, target_language)
                .await?;
            spinner.finish_with_message("Transcript translated");
        }

        // Step 3: Serialize the subtitle file
        let subtitle_path = output_dir.join(format!(
            "{}.{}.{}",
            video_stem,
            target_language,
            format.extension()
        ));
        let spinner = step_spinner("Generating caption file...");
        subtitle::write_transcript(&transcript, format, &subtitle_path).await?;
        spinner.finish_with_message("Caption file generated");

        // Step 4: Burn the subtitles into the video
        let video_path = output_dir.join(format!("{}.{}.mp4", video_stem, target_language));
        let spinner = step_spinner("Embedding subtitles into video...");
        self.media
            .embed_subtitles(input_path, &subtitle_path, &video_path)
            .await?;
        spinner.finish_with_message("Subtitles embedded");

        info!(
            "Captioning completed: {} (subtitles: {})",
            video_path.display(),
            subtitle_path.display()
        );

        Ok(CaptionOutput {
            video_path,
            subtitle_path,
            detected_language,
            translated,
        })
    }

    /// Extract the audio track from a video file.
    pub async fn extract_audio<P: AsRef<Path>>(&self, video_path: P, audio_path: P) -> Result<()> {
        self.media
            .extract_audio(video_path.as_ref(), audio_path.as_ref())
            .await
    }

    /// Transcribe an audio file and serialize the transcript as subtitles.
    pub async fn transcribe_audio<P: AsRef<Path>>(
        &self,
        audio_path: P,
        output_path: P,
        language: Option<&str>,
        format: SubtitleFormat,
    ) -> Result<()> {
        let transcript = self
            .transcriber
            .transcribe(audio_path.as_ref(), language)
            .await?;

        subtitle::write_transcript(&transcript, format, output_path.as_ref()).await
    }

    /// Burn an existing subtitle file into a video file.
    pub async fn embed_subtitles<P: AsRef<Path>>(
        &self,
        video_path: P,
        subtitle_path: P,
        output_path: P,
    ) -> Result<()> {
        self.media
            .embed_subtitles(video_path.as_ref(), subtitle_path.as_ref(), output_path.as_ref())
            .await
    }
}

/// Spinner narrating a pipeline step.
fn step_spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(message.into());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MockMediaProcessor;
    use crate::transcribe::MockTranscriber;
    use crate::translate::MockTranslator;
    use crate::transcript::{Transcript, TranscriptSegment};

    fn sample_transcript(language: &str) -> Transcript {
        Transcript {
            text: "Hello there.".to_string(),
            segments: vec![TranscriptSegment {
                id: 0,
                start: 0.0,
                end: 1.5,
                text: "Hello there.".to_string(),
            }],
            language: language.to_string(),
        }
    }

    fn fake_video(dir: &Path) -> PathBuf {
        let input = dir.join("talk.mp4");
        std::fs::write(&input, b"not really a video").unwrap();
        input
    }

    #[tokio::test]
    async fn test_caption_skips_translation_when_language_matches() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_video(dir.path());

        let mut transcriber = MockTranscriber::new();
        transcriber
            .expect_transcribe()
            .returning(|_, _| Ok(sample_transcript("en")));

        // No expectations set: a translation call would panic the test
        let translator = MockTranslator::new();

        let mut media = MockMediaProcessor::new();
        media.expect_extract_audio().returning(|_, _| Ok(()));
        media.expect_embed_subtitles().returning(|_, _, _| Ok(()));

        let workflow = Workflow::with_components(
            Box::new(transcriber),
            Box::new(translator),
            Box::new(media),
        );

        let output = workflow
            .caption_video(&input, "english", SubtitleFormat::Srt, Some(dir.path()))
            .await
            .unwrap();

        assert!(!output.translated);
        assert_eq!(output.detected_language, "en");
        assert_eq!(
            output.subtitle_path.file_name().unwrap().to_str().unwrap(),
            "talk.en.srt"
        );
        assert_eq!(
            output.video_path.file_name().unwrap().to_str().unwrap(),
            "talk.en.mp4"
        );

        let srt = std::fs::read_to_string(&output.subtitle_path).unwrap();
        assert!(srt.contains("Hello there."));
    }

    #[tokio::test]
    async fn test_caption_translates_when_language_differs() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_video(dir.path());

        let mut transcriber = MockTranscriber::new();
        transcriber
            .expect_transcribe()
            .returning(|_, _| Ok(sample_transcript("en")));

        let mut translator = MockTranslator::new();
        translator
            .expect_translate_transcript()
            .withf(|_, target| target == "ja")
            .times(1)
            .returning(|transcript, _| {
                for segment in &mut transcript.segments {
                    segment.text = "こんにちは。".to_string();
                }
                Ok(())
            });

        let mut media = MockMediaProcessor::new();
        media.expect_extract_audio().returning(|_, _| Ok(()));
        media.expect_embed_subtitles().returning(|_, _, _| Ok(()));

        let workflow = Workflow::with_components(
            Box::new(transcriber),
            Box::new(translator),
            Box::new(media),
        );

        let output = workflow
            .caption_video(&input, "japanese", SubtitleFormat::Srt, Some(dir.path()))
            .await
            .unwrap();

        assert!(output.translated);
        assert_eq!(
            output.subtitle_path.file_name().unwrap().to_str().unwrap(),
            "talk.ja.srt"
        );

        let srt = std::fs::read_to_string(&output.subtitle_path).unwrap();
        assert!(srt.contains("こんにちは。"));
    }

    #[tokio::test]
    async fn test_caption_rejects_missing_input() {
        let workflow = Workflow::with_components(
            Box::new(MockTranscriber::new()),
            Box::new(MockTranslator::new()),
            Box::new(MockMediaProcessor::new()),
        );

        let err = workflow
            .caption_video(
                Path::new("/nonexistent/talk.mp4"),
                "english",
                SubtitleFormat::Srt,
                None::<&Path>,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CapsubError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_caption_rejects_unknown_language() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_video(dir.path());

        let workflow = Workflow::with_components(
            Box::new(MockTranscriber::new()),
            Box::new(MockTranslator::new()),
            Box::new(MockMediaProcessor::new()),
        );

        let err = workflow
            .caption_video(&input, "klingon", SubtitleFormat::Srt, Some(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, CapsubError::UnsupportedLanguage(_)));
    }
}
