//! JPEG photo compression backed by the `image` crate.

use garden_core::{CompressedImage, GardenError, ImageProcessor};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, ImageResult};
use log::{debug, error};

/// Longest edge and JPEG quality of a stored image.
#[derive(Debug, Clone, Copy)]
struct Target {
    max_edge: u32,
    quality: u8,
}

const FULL_IMAGE: Target = Target {
    max_edge: 800,
    quality: 80,
};

const THUMBNAIL: Target = Target {
    max_edge: 200,
    quality: 70,
};

/// Decodes any supported image and re-encodes it as a display image plus a
/// thumbnail. Images are scaled down to fit, never up.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegProcessor;

impl ImageProcessor for JpegProcessor {
    fn compress(&self, source: &[u8]) -> garden_core::Result<CompressedImage> {
        compress(source).map_err(|e| {
            error!("Failed to process image: {e}");
            GardenError::ImageProcessing {
                message: "Failed to process image".to_string(),
            }
        })
    }
}

fn compress(source: &[u8]) -> ImageResult<CompressedImage> {
    let image = image::load_from_memory(source)?;
    debug!(
        "Compressing {}x{} image ({} bytes)",
        image.width(),
        image.height(),
        source.len()
    );

    Ok(CompressedImage {
        full_image: encode(&image, FULL_IMAGE)?,
        thumbnail: encode(&image, THUMBNAIL)?,
    })
}

fn encode(image: &DynamicImage, target: Target) -> ImageResult<Vec<u8>> {
    let scaled = if image.width() > target.max_edge || image.height() > target.max_edge {
        image.resize(target.max_edge, target.max_edge, FilterType::Lanczos3)
    } else {
        image.clone()
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, target.quality).encode_image(&scaled.to_rgb8())?;
    Ok(out)
}
