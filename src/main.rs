//! Capsub - Video Captioning Workflow
//!
//! This is the main entry point for the Capsub application, which
//! transcribes the audio track of a video with whisper, translates the
//! transcript when needed, and burns the resulting subtitles into the
//! video using ffmpeg.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use capsub::cli::{Args, Commands};
use capsub::config::Config;
use capsub::language;
use capsub::subtitle::SubtitleFormat;
use capsub::workflow::Workflow;
use capsub::youtube::{VideoListing, YoutubeClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    info!("Starting Capsub - Video Captioning Workflow");

    // Load configuration
    let config = Config::load(args.config.as_deref())?;

    // Execute command
    match args.command {
        Commands::Caption {
            input,
            language,
            format,
            output_dir,
        } => {
            info!("Captioning video file: {}", input.display());

            let format = SubtitleFormat::from_extension(&format)?;
            let workflow = Workflow::new(config)?;
            let output = workflow
                .caption_video(&input, &language, format, output_dir.as_ref())
                .await?;

            if output.translated {
                println!(
                    "\nTranscript translated from detected language '{}'",
                    output.detected_language
                );
            } else {
                println!(
                    "\nDetected language '{}' matches the caption language, no translation needed",
                    output.detected_language
                );
            }
            println!("Captioned video: {}", output.video_path.display());
            println!("Subtitle file:   {}", output.subtitle_path.display());
        }
        Commands::Youtube { url } => {
            info!("Fetching YouTube video metadata for: {}", url);

            let client = YoutubeClient::new(config.youtube.clone());
            let listing = client.fetch_video(&url).await?;
            print_video_listing(&listing);
        }
        Commands::Languages => {
            println!("\nSupported caption languages:");
            println!("{:<25} {:<8}", "Name", "Code");
            println!("{}", "-".repeat(33));

            for (name, code) in language::SUPPORTED_LANGUAGES {
                println!("{:<25} {:<8}", name, code);
            }
        }
        Commands::Extract { input, output } => {
            info!("Extracting audio from: {}", input.display());

            let workflow = Workflow::new(config)?;
            workflow.extract_audio(&input, &output).await?;
            println!("Audio track written to {}", output.display());
        }
        Commands::Transcribe {
            input,
            output,
            language,
            format,
        } => {
            info!("Transcribing audio: {}", input.display());

            let format = SubtitleFormat::from_extension(&format)?;
            let workflow = Workflow::new(config)?;
            workflow
                .transcribe_audio(&input, &output, language.as_deref(), format)
                .await?;
            println!("Subtitles written to {}", output.display());
        }
        Commands::Embed {
            video,
            subtitles,
            output,
        } => {
            info!("Embedding subtitles into video: {}", video.display());

            let workflow = Workflow::new(config)?;
            workflow.embed_subtitles(&video, &subtitles, &output).await?;
            println!("Captioned video written to {}", output.display());
        }
    }

    info!("Capsub workflow completed successfully");
    Ok(())
}

/// Print a fetched YouTube video listing with its download links
fn print_video_listing(listing: &VideoListing) {
    println!("\n{}", listing.title);
    println!("Duration:  {}", listing.video_duration);
    println!("Thumbnail: {}", listing.thumbnail);

    if !listing.videos.is_empty() {
        println!("\nVideo formats:");
        println!("{:<20} {:<60}", "Format", "Download URL");
        println!("{}", "-".repeat(80));
        for video in &listing.videos {
            println!("{:<20} {:<60}", video.video_format, video.video_url);
        }
    }

    if !listing.audios.is_empty() {
        println!("\nAudio formats:");
        println!("{:<20} {:<60}", "Format", "Download URL");
        println!("{}", "-".repeat(80));
        for audio in &listing.audios {
            println!("{:<20} {:<60}", audio.audio_format, audio.audio_url);
        }
    }
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let capsub_dir = std::env::current_dir()?.join(".capsub");
    let log_dir = capsub_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "capsub.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
