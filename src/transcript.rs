use serde::{Deserialize, Serialize};

/// A single timestamped segment of transcribed speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub id: i32,
    /// Segment start in seconds from the beginning of the audio.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    pub text: String,
}

/// Transcript of an audio track, as produced by the transcription model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text.
    pub text: String,
    /// Timestamped segments in chronological order.
    pub segments: Vec<TranscriptSegment>,
    /// Language code detected by the model (e.g. "en").
    pub language: String,
}

impl Transcript {
    /// Total spoken duration covered by the transcript, in seconds.
    pub fn duration(&self) -> f64 {
        self.segments.last().map(|seg| seg.end).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: i32, start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            id,
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_duration_follows_last_segment() {
        let transcript = Transcript {
            text: "hello world".to_string(),
            segments: vec![segment(0, 0.0, 1.5, "hello"), segment(1, 1.5, 3.2, "world")],
            language: "en".to_string(),
        };
        assert_eq!(transcript.duration(), 3.2);
        assert!(!transcript.is_empty());
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript {
            text: String::new(),
            segments: vec![],
            language: "en".to_string(),
        };
        assert_eq!(transcript.duration(), 0.0);
        assert!(transcript.is_empty());
    }
}
