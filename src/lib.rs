//! Capsub - Video Captioning Workflow
//!
//! A Rust implementation of a video captioning workflow: transcribe the audio
//! track of a video with whisper, optionally translate the transcript, and
//! burn the resulting subtitles into the video using ffmpeg. A separate
//! command fetches metadata and download links for a YouTube video from an
//! external API.

pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod media;
pub mod subtitle;
pub mod transcribe;
pub mod transcript;
pub mod translate;
pub mod workflow;
pub mod youtube;
