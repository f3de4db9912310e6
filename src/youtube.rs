use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::YoutubeConfig;
use crate::error::{CapsubError, Result};

/// Metadata and download links for a YouTube video, as returned by the
/// external extraction API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoListing {
    pub title: String,
    pub thumbnail: String,
    pub video_duration: String,
    pub videos: Vec<VideoFormat>,
    pub audios: Vec<AudioFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoFormat {
    pub video_format: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFormat {
    pub audio_format: String,
    pub audio_url: String,
}

/// Client for the YouTube metadata API
pub struct YoutubeClient {
    client: Client,
    config: YoutubeConfig,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    /// Fetch metadata and download links for a YouTube video URL.
    pub async fn fetch_video(&self, url: &str) -> Result<VideoListing> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CapsubError::Youtube("No YouTube URL provided".to_string()));
        }

        if self.config.api_hostname.trim().is_empty() {
            return Err(CapsubError::Config(
                "YouTube API hostname not configured. Set YT_API_HOSTNAME or [youtube] api_hostname"
                    .to_string(),
            ));
        }

        let endpoint = format!("{}/get-youtube-video", self.config.api_hostname);
        debug!("Fetching YouTube metadata from: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| {
                CapsubError::Youtube(format!(
                    "Unable to retrieve YouTube video, try again later ({})",
                    e
                ))
            })?;

        if !response.status().is_success() {
            return Err(CapsubError::Youtube(format!(
                "YouTube API error: HTTP {}",
                response.status()
            )));
        }

        let listing: VideoListing = response.json().await.map_err(|e| {
            CapsubError::Youtube(format!("Failed to parse YouTube API response: {}", e))
        })?;

        info!(
            "Video found and collected: '{}' ({} video formats, {} audio formats)",
            listing.title,
            listing.videos.len(),
            listing.audios.len()
        );

        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserialization() {
        let json = r#"{
            "title": "Never Gonna Give You Up",
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg",
            "video_duration": "3:33",
            "videos": [
                {"video_format": "720p (mp4)", "video_url": "https://example.com/v720"},
                {"video_format": "360p (mp4)", "video_url": "https://example.com/v360"}
            ],
            "audios": [
                {"audio_format": "128kbps (m4a)", "audio_url": "https://example.com/a128"}
            ]
        }"#;

        let listing: VideoListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.title, "Never Gonna Give You Up");
        assert_eq!(listing.video_duration, "3:33");
        assert_eq!(listing.videos.len(), 2);
        assert_eq!(listing.audios[0].audio_format, "128kbps (m4a)");
    }

    #[test]
    fn test_fetch_rejects_empty_url() {
        let client = YoutubeClient::new(YoutubeConfig {
            api_hostname: "http://localhost:3000".to_string(),
        });

        let err = tokio_test::block_on(client.fetch_video("  ")).unwrap_err();
        assert!(matches!(err, CapsubError::Youtube(_)));
    }

    #[test]
    fn test_fetch_requires_hostname() {
        let client = YoutubeClient::new(YoutubeConfig::default());

        let err =
            tokio_test::block_on(client.fetch_video("https://youtu.be/dQw4w9WgXcQ")).unwrap_err();
        assert!(matches!(err, CapsubError::Config(_)));
    }
}
