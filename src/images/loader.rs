//! Image download and decoding.

use anyhow::{Context, Result, bail};
use image::DynamicImage;

/// Largest edge kept after decoding
const MAX_DIMENSION: u32 = 800;

/// Download an image from a URL and decode it.
pub async fn download_and_decode(client: &reqwest::Client, url: &str) -> Result<DynamicImage> {
    tracing::debug!("Downloading image: {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to download image")?;

    if !response.status().is_success() {
        bail!("HTTP {}", response.status());
    }

    let bytes = response.bytes().await.context("Failed to read image body")?;
    let image = image::load_from_memory(&bytes).context("Failed to decode image")?;

    Ok(resize_if_needed(image))
}

/// Shrink images larger than `MAX_DIMENSION`, keeping the aspect ratio.
pub fn resize_if_needed(image: DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return image;
    }

    let ratio = f64::from(width) / f64::from(height);
    let (new_width, new_height) = if width > height {
        (MAX_DIMENSION, (f64::from(MAX_DIMENSION) / ratio) as u32)
    } else {
        ((f64::from(MAX_DIMENSION) * ratio) as u32, MAX_DIMENSION)
    };

    image.resize(new_width, new_height, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_image_untouched() {
        let image = resize_if_needed(DynamicImage::new_rgb8(640, 480));
        assert_eq!((image.width(), image.height()), (640, 480));
    }

    #[test]
    fn test_large_image_shrunk_keeping_ratio() {
        let image = resize_if_needed(DynamicImage::new_rgb8(1600, 800));
        assert_eq!((image.width(), image.height()), (800, 400));

        let image = resize_if_needed(DynamicImage::new_rgb8(1080, 1350));
        assert_eq!(image.height(), 800);
        assert!(image.width() <= 800);
    }
}
