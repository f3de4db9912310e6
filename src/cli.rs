use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transcribe a video, translate the transcript when needed, and burn
    /// the resulting subtitles into the video
    Caption {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Caption language (name or code, e.g. "japanese" or "ja")
        #[arg(short, long, default_value = "english")]
        language: String,

        /// Subtitle format (srt, vtt)
        #[arg(short, long, default_value = "srt")]
        format: String,

        /// Output directory for the captioned video and subtitle file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Fetch metadata and download links for a YouTube video
    Youtube {
        /// YouTube video URL
        #[arg(short, long)]
        url: String,
    },

    /// List supported caption languages
    Languages,

    /// Extract the audio track from a video file
    Extract {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe an audio file to a subtitle file
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,

        /// Source language hint
        #[arg(short, long)]
        language: Option<String>,

        /// Subtitle format (srt, vtt)
        #[arg(short, long, default_value = "srt")]
        format: String,
    },

    /// Burn an existing subtitle file into a video file
    Embed {
        /// Input video file
        #[arg(short, long)]
        video: PathBuf,

        /// Subtitle file
        #[arg(short, long)]
        subtitles: PathBuf,

        /// Output video file
        #[arg(short, long)]
        output: PathBuf,
    },
}
