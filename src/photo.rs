//! Best-effort player photo retrieval
//!
//! Photos come from a third-party CDN that may be slow, missing images, or
//! offline. Nothing here returns an error to the caller: every failure
//! becomes [`Photo::Unavailable`] so a profile can still be shown.

use crate::error::{Result, StatsError};
use crate::model::Player;
use image::imageops::FilterType;
use image::DynamicImage;
use std::time::Duration;

/// Display width of a profile photo in pixels
pub const PHOTO_WIDTH: u32 = 150;

/// Outcome of a photo fetch
#[derive(Debug, Clone)]
pub enum Photo {
    Available(DynamicImage),
    Unavailable { player: String, reason: String },
}

impl Photo {
    pub fn is_available(&self) -> bool {
        matches!(self, Photo::Available(_))
    }

    /// Fetch through `fetcher`, turning a fetcher that failed to build into
    /// [`Photo::Unavailable`]
    pub fn from_fetcher(fetcher: Result<PhotoFetcher>, player: &Player) -> Photo {
        match fetcher {
            Ok(fetcher) => fetcher.fetch(player),
            Err(e) => {
                log::warn!("Photo of {} unavailable: {}", player.name, e);
                Photo::Unavailable {
                    player: player.name.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Notice to show in place of the photo
    pub fn notice(&self) -> Option<String> {
        match self {
            Photo::Available(_) => None,
            Photo::Unavailable { player, .. } => {
                Some(format!("The photo of {} is not available.", player))
            }
        }
    }
}

/// Fetches and resizes player photos
pub struct PhotoFetcher {
    client: reqwest::blocking::Client,
    width: u32,
}

impl PhotoFetcher {
    /// Create a fetcher with the default width and a 30 second timeout
    pub fn new() -> Result<Self> {
        Self::with_config(PHOTO_WIDTH, 30)
    }

    /// Create a fetcher with a custom display width and request timeout
    pub fn with_config(width: u32, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36")
            .build()?;

        Ok(Self { client, width })
    }

    /// Fetch the player's photo from its derived URL
    pub fn fetch(&self, player: &Player) -> Photo {
        match self.try_fetch(&player.asset_url) {
            Ok(image) => Photo::Available(image),
            Err(e) => {
                log::warn!("Photo of {} unavailable: {}", player.name, e);
                Photo::Unavailable {
                    player: player.name.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_fetch(&self, asset_url: &str) -> Result<DynamicImage> {
        let url = url::Url::parse(asset_url)
            .map_err(|e| StatsError::Photo(format!("Invalid URL '{}': {}", asset_url, e)))?;

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Photo(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response.bytes()?;
        let image = image::load_from_memory(&bytes)?;
        resize_to_width(&image, self.width)
    }
}

/// Fetch a player's photo with the default fetcher; never fails
pub fn fetch_photo(player: &Player) -> Photo {
    Photo::from_fetcher(PhotoFetcher::new(), player)
}

/// Scale an image to `width`, keeping its aspect ratio
pub fn resize_to_width(image: &DynamicImage, width: u32) -> Result<DynamicImage> {
    if image.width() == 0 || width == 0 {
        return Err(StatsError::Photo("Cannot resize an empty image".to_string()));
    }

    let height = (u64::from(image.height()) * u64::from(width) / u64::from(image.width())) as u32;
    Ok(image.resize_exact(width, height.max(1), FilterType::CatmullRom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_resize_keeps_aspect_ratio() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(60, 60));
        let resized = resize_to_width(&image, 150).unwrap();
        assert_eq!((resized.width(), resized.height()), (150, 150));

        let image = DynamicImage::ImageRgba8(RgbaImage::new(200, 90));
        let resized = resize_to_width(&image, 150).unwrap();
        // 90 * 150 / 200 = 67.5, truncated
        assert_eq!((resized.width(), resized.height()), (150, 67));
    }

    #[test]
    fn test_resize_empty_image() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(resize_to_width(&image, 150).is_err());
    }

    #[test]
    fn test_invalid_url_is_unavailable() {
        let fetcher = PhotoFetcher::new().unwrap();
        let player = Player::new(1, "Nobody").with_photo("", "not a url");
        let photo = fetcher.fetch(&player);
        assert!(!photo.is_available());
        assert_eq!(
            photo.notice().as_deref(),
            Some("The photo of Nobody is not available.")
        );
    }

    #[test]
    fn test_fetcher_build_failure_is_unavailable() {
        let player = Player::new(158023, "L. Messi");
        let fetcher = Err(StatsError::Photo("TLS backend unavailable".to_string()));
        match Photo::from_fetcher(fetcher, &player) {
            Photo::Unavailable { player, reason } => {
                assert_eq!(player, "L. Messi");
                assert!(reason.contains("TLS backend unavailable"));
            }
            Photo::Available(_) => panic!("Expected an unavailable photo"),
        }
    }

    #[test]
    fn test_fetch_photo_invalid_url() {
        let player = Player::new(1, "Nobody").with_photo("", "not a url");
        assert!(!fetch_photo(&player).is_available());
    }

    #[test]
    #[ignore] // Requires network access
    fn test_fetch_messi() {
        let fetcher = PhotoFetcher::new().unwrap();
        let player = Player::new(158023, "L. Messi").with_photo(
            "https://cdn.sofifa.org/players/4/19/158023.png",
            "https://cdn.sofifa.net/players/158/023/19_60.png",
        );
        match fetcher.fetch(&player) {
            Photo::Available(image) => assert_eq!(image.width(), PHOTO_WIDTH),
            Photo::Unavailable { reason, .. } => {
                // CDN may block automated requests
                println!("Photo unavailable: {}", reason);
            }
        }
    }
}
