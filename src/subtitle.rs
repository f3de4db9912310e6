use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::{CapsubError, Result};
use crate::transcript::Transcript;

/// Subtitle file formats the workflow can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
}

impl SubtitleFormat {
    /// Parse a format from its file extension.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim().to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            other => Err(CapsubError::UnsupportedFormat(format!(
                "Unknown subtitle format '{}'. Valid formats: srt, vtt",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }
}

/// Serialize a transcript to the given subtitle format and write it out.
pub async fn write_transcript<P: AsRef<Path>>(
    transcript: &Transcript,
    format: SubtitleFormat,
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(
        "Generating {} file: {}",
        format.extension().to_uppercase(),
        output_path.display()
    );

    let content = match format {
        SubtitleFormat::Srt => render_srt(transcript),
        SubtitleFormat::Vtt => render_vtt(transcript),
    };

    fs::write(output_path, content).await.map_err(CapsubError::Io)?;

    info!("Subtitle file generated successfully");
    Ok(())
}

/// Render a transcript as SRT cue blocks.
fn render_srt(transcript: &Transcript) -> String {
    let mut content = String::new();

    for (index, segment) in transcript.segments.iter().enumerate() {
        let start_time = format_timestamp(segment.start, ',');
        let end_time = format_timestamp(segment.end, ',');

        content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start_time,
            end_time,
            segment.text.trim()
        ));
    }

    content
}

/// Render a transcript as WebVTT.
fn render_vtt(transcript: &Transcript) -> String {
    let mut content = String::from("WEBVTT\n\n");

    for (index, segment) in transcript.segments.iter().enumerate() {
        let start_time = format_timestamp(segment.start, '.');
        let end_time = format_timestamp(segment.end, '.');

        content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start_time,
            end_time,
            segment.text.trim()
        ));
    }

    content
}

/// Format time in seconds to HH:MM:SS<sep>mmm, where the millisecond
/// separator is ',' for SRT and '.' for WebVTT.
fn format_timestamp(seconds: f64, millis_separator: char) -> String {
    let total_milliseconds = (seconds * 1000.0) as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours, minutes, secs, millis_separator, millis
    )
}
