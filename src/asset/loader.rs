//! Fetch and decode floorplan images

use std::future::Future;

use anyhow::Context;
use image::RgbaImage;

use super::is_remote;

/// Produces a decoded RGBA floorplan for a path
pub trait AssetLoader: Send + Sync + 'static {
    fn load(&self, path: &str) -> impl Future<Output = anyhow::Result<RgbaImage>> + Send;
}

/// Reads local files or downloads HTTP(S) URLs, then decodes with `image`
#[derive(Clone, Debug, Default)]
pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        if is_remote(path) {
            let response = self
                .client
                .get(path)
                .send()
                .await?
                .error_for_status()
                .with_context(|| format!("Download of {path} failed"))?;
            Ok(response.bytes().await?.to_vec())
        } else {
            tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {path}"))
        }
    }
}

impl AssetLoader for ImageLoader {
    async fn load(&self, path: &str) -> anyhow::Result<RgbaImage> {
        let bytes = self.fetch(path).await?;
        let img = decode_image(&bytes)?;
        log::debug!("Floorplan decoded: {}x{} pixels", img.width(), img.height());
        Ok(img)
    }
}

/// Decode any format the `image` crate recognises into RGBA8
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode floorplan image")?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[tokio::test]
    async fn test_load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plan.png");
        RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]))
            .save(&file)
            .unwrap();

        let img = ImageLoader::default().load(file.to_str().unwrap()).await.unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);
    }
}
