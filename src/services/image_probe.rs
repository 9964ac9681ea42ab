//! Image availability probe
//!
//! A candidate logo URL only counts once it actually serves an image: the
//! probe downloads it (bounded in time and size) and checks that the bytes
//! decode. SVG is accepted on content type or markup since the `image`
//! crate cannot rasterize it.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, trace};

use crate::config::LogoConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::HttpClientFactory;

/// Anything that can tell whether a URL serves a loadable image
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn is_loadable(&self, url: &str) -> bool;
}

pub struct HttpImageProbe {
    client: Client,
    max_bytes: usize,
}

impl HttpImageProbe {
    pub fn new(config: &LogoConfig) -> AppResult<Self> {
        let client = HttpClientFactory::new(config.probe_timeout)
            .with_user_agent(config.scraper_user_agent.as_str())
            .with_accept("image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8")
            .build("image_probe")?;
        Ok(Self {
            client,
            max_bytes: config.max_image_bytes,
        })
    }

    async fn download(&self, url: &str) -> AppResult<(Option<String>, Vec<u8>)> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::external_service(
                "image_probe",
                format!("HTTP {} for {}", response.status(), url),
            ));
        }

        if let Some(length) = response.content_length()
            && length as usize > self.max_bytes
        {
            return Err(AppError::validation(format!(
                "image too large: {} bytes (max {})",
                length, self.max_bytes
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > self.max_bytes {
                return Err(AppError::validation(format!(
                    "image exceeds {} bytes",
                    self.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        Ok((content_type, body))
    }
}

/// Decide whether downloaded bytes are a renderable image
pub fn looks_like_image(content_type: Option<&str>, body: &[u8]) -> bool {
    if body.is_empty() {
        return false;
    }
    if content_type.is_some_and(|ct| ct.starts_with("image/svg")) || is_svg_markup(body) {
        return true;
    }
    image::load_from_memory(body).is_ok()
}

fn is_svg_markup(body: &[u8]) -> bool {
    let head = &body[..body.len().min(512)];
    String::from_utf8_lossy(head).to_ascii_lowercase().contains("<svg")
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn is_loadable(&self, url: &str) -> bool {
        if url.trim().is_empty() {
            return false;
        }

        match self.download(url).await {
            Ok((content_type, body)) => {
                let loadable = looks_like_image(content_type.as_deref(), &body);
                trace!(
                    "Probed {} ({:?}, {} bytes): loadable={}",
                    url,
                    content_type,
                    body.len(),
                    loadable
                );
                loadable
            }
            Err(e) => {
                debug!("Image probe failed for {}: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_png_bytes_are_an_image() {
        assert!(looks_like_image(Some("image/png"), &tiny_png()));
        // content type is not trusted on its own
        assert!(looks_like_image(Some("application/octet-stream"), &tiny_png()));
    }

    #[test]
    fn test_html_error_page_is_not_an_image() {
        let body = b"<!doctype html><html><body>Not found</body></html>";
        assert!(!looks_like_image(Some("image/png"), body));
        assert!(!looks_like_image(Some("text/html"), body));
    }

    #[test]
    fn test_svg_is_accepted() {
        let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        assert!(looks_like_image(None, svg));
        assert!(looks_like_image(Some("image/svg+xml"), b"<svg/>"));
    }

    #[test]
    fn test_empty_body_is_not_an_image() {
        assert!(!looks_like_image(Some("image/png"), b""));
    }
}
