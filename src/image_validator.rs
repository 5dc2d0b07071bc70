// src/image_validator.rs
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use std::io::Cursor;
use imagesize::ImageType;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Clone, Error)]
#[error("{field}: {message}")]
pub struct ImageValidationError {
    pub field: &'static str,
    pub error_type: ImageErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageErrorType {
    InvalidEncoding,
    EmptyData,
    CorruptedData,
    WrongFormat,
    TooLarge,
}

impl ImageErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEncoding => "IMAGE_INVALID_ENCODING",
            Self::EmptyData => "IMAGE_EMPTY",
            Self::CorruptedData => "IMAGE_CORRUPTED",
            Self::WrongFormat => "IMAGE_WRONG_FORMAT",
            Self::TooLarge => "IMAGE_TOO_LARGE",
        }
    }
}

/// Image recovered from an embedded base64 field. `bytes` are always PNG;
/// `format` names the format that was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub format: &'static str,
}

const MAX_SIZE: usize = 10 * 1024 * 1024;
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

pub struct ImageValidator;

impl ImageValidator {
    /// Drop a data-URI header (`data:image/png;base64,`) if present.
    pub fn strip_data_uri(encoded: &str) -> &str {
        match encoded.rsplit_once(',') {
            Some((_, payload)) => payload,
            None => encoded,
        }
    }

    /// Decode an embedded image field and check that it is a raster image
    /// the document writer can place.
    pub fn decode_embedded(
        field: &'static str,
        encoded: &str,
    ) -> Result<DecodedImage, ImageValidationError> {
        let payload: String = Self::strip_data_uri(encoded)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if payload.is_empty() {
            return Err(ImageValidationError {
                field,
                error_type: ImageErrorType::EmptyData,
                message: "Embedded image is empty".to_string(),
                suggestion: "Upload the image again or remove it".to_string(),
            });
        }

        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| ImageValidationError {
                field,
                error_type: ImageErrorType::InvalidEncoding,
                message: format!("Embedded image is not valid base64: {}", e),
                suggestion: "Send the image as a base64 data URI".to_string(),
            })?;

        if bytes.len() > MAX_SIZE {
            return Err(ImageValidationError {
                field,
                error_type: ImageErrorType::TooLarge,
                message: format!(
                    "Image too large: {:.1}MB (max 10MB)",
                    bytes.len() as f64 / 1024.0 / 1024.0
                ),
                suggestion: "Please resize or compress your image and try again".to_string(),
            });
        }

        if bytes.len() < 8 {
            return Err(ImageValidationError {
                field,
                error_type: ImageErrorType::CorruptedData,
                message: "Image data too small or corrupted".to_string(),
                suggestion: "Please upload a valid image file".to_string(),
            });
        }

        let format = Self::detect_format(field, &bytes)?;

        let size = imagesize::blob_size(&bytes).map_err(|e| {
            error!("Cannot read {} dimensions: {}", field, e);
            ImageValidationError {
                field,
                error_type: ImageErrorType::CorruptedData,
                message: format!("Cannot read {} image dimensions", format),
                suggestion: "Please upload a valid image file".to_string(),
            }
        })?;

        if size.width == 0 || size.height == 0 {
            return Err(ImageValidationError {
                field,
                error_type: ImageErrorType::CorruptedData,
                message: "Image has zero width or height".to_string(),
                suggestion: "Please upload a valid image file".to_string(),
            });
        }

        debug!(
            "Decoded {} ({}, {}x{}, {} bytes)",
            field,
            format,
            size.width,
            size.height,
            bytes.len()
        );

        let bytes = if format == "png" {
            bytes
        } else {
            Self::transcode_to_png(field, format, &bytes)?
        };

        Ok(DecodedImage {
            width_px: u32::try_from(size.width).unwrap_or(u32::MAX),
            height_px: u32::try_from(size.height).unwrap_or(u32::MAX),
            bytes,
            format,
        })
    }

    /// The DOCX writer stores every picture as a PNG part.
    fn transcode_to_png(
        field: &'static str,
        format: &'static str,
        bytes: &[u8],
    ) -> Result<Vec<u8>, ImageValidationError> {
        let corrupted = |e: image::ImageError| {
            error!("Cannot convert {} {} to PNG: {}", field, format, e);
            ImageValidationError {
                field,
                error_type: ImageErrorType::CorruptedData,
                message: format!("Cannot decode {} image", format),
                suggestion: "Please upload a valid PNG or JPEG file".to_string(),
            }
        };

        let decoded = image::load_from_memory(bytes).map_err(corrupted)?;
        let mut png = Cursor::new(Vec::new());
        decoded
            .write_to(&mut png, ImageFormat::Png)
            .map_err(corrupted)?;

        debug!("Transcoded {} from {} to PNG", field, format);
        Ok(png.into_inner())
    }

    fn detect_format(
        field: &'static str,
        bytes: &[u8],
    ) -> Result<&'static str, ImageValidationError> {
        if bytes.starts_with(PNG_SIGNATURE) {
            return Ok("png");
        }
        if bytes.starts_with(JPEG_SIGNATURE) {
            return Ok("jpeg");
        }

        match imagesize::image_type(bytes) {
            Ok(ImageType::Gif) => Ok("gif"),
            Ok(ImageType::Bmp) => Ok("bmp"),
            Ok(ImageType::Webp) => Ok("webp"),
            _ => Err(ImageValidationError {
                field,
                error_type: ImageErrorType::WrongFormat,
                message: "Unsupported image format".to_string(),
                suggestion: "Please use PNG or JPEG format".to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 1x1 transparent PNG.
    pub(crate) const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_strip_data_uri() {
        assert_eq!(
            ImageValidator::strip_data_uri("data:image/png;base64,AAAA"),
            "AAAA"
        );
        assert_eq!(ImageValidator::strip_data_uri("AAAA"), "AAAA");
    }

    #[test]
    fn test_decode_png_with_prefix() {
        let encoded = format!("data:image/png;base64,{}", PIXEL_PNG);
        let image = ImageValidator::decode_embedded("profile", &encoded).unwrap();
        assert_eq!(image.format, "png");
        assert_eq!((image.width_px, image.height_px), (1, 1));
        assert!(image.bytes.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_decode_bare_base64() {
        let image = ImageValidator::decode_embedded("logo", PIXEL_PNG).unwrap();
        assert_eq!(image.format, "png");
    }

    #[test]
    fn test_invalid_base64_is_reported() {
        let err = ImageValidator::decode_embedded("logo", "data:image/png;base64,@@@@").unwrap_err();
        assert_eq!(err.error_type, ImageErrorType::InvalidEncoding);
        assert_eq!(err.field, "logo");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        // "hello world, plain text" in base64
        let err = ImageValidator::decode_embedded("logo", "aGVsbG8gd29ybGQsIHBsYWluIHRleHQ=")
            .unwrap_err();
        assert_eq!(err.error_type, ImageErrorType::WrongFormat);
    }

    #[test]
    fn test_empty_payload() {
        let err = ImageValidator::decode_embedded("logo", "data:image/png;base64,").unwrap_err();
        assert_eq!(err.error_type, ImageErrorType::EmptyData);
    }

    /// 3x2 JPEG, encoded on the fly.
    pub(crate) fn jpeg_base64() -> String {
        let pixels = image::RgbImage::from_pixel(3, 2, image::Rgb([200, 30, 30]));
        let mut jpeg = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(pixels)
            .write_to(&mut jpeg, ImageFormat::Jpeg)
            .unwrap();
        STANDARD.encode(jpeg.into_inner())
    }

    #[test]
    fn test_jpeg_is_transcoded_to_png() {
        let encoded = format!("data:image/jpeg;base64,{}", jpeg_base64());
        let image = ImageValidator::decode_embedded("profile", &encoded).unwrap();
        assert_eq!(image.format, "jpeg");
        assert_eq!((image.width_px, image.height_px), (3, 2));
        assert!(image.bytes.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_undecodable_jpeg_is_corrupted() {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend_from_slice(&[0u8; 32]);
        let err = ImageValidator::decode_embedded("profile", &STANDARD.encode(bytes)).unwrap_err();
        assert_eq!(err.error_type, ImageErrorType::CorruptedData);
    }
}
