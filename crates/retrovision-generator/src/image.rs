//! Conversion of image blobs into displayable references.

use base64::Engine;

use crate::backend::ImageBlob;
use crate::error::{GenerateError, Stage};

/// MIME type assumed when the endpoint does not report one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Build a `data:` URI from an image blob.
///
/// The blob must be non-empty, valid standard base64, and the MIME type (if
/// reported) must be an `image/*` type.
pub fn to_data_uri(blob: &ImageBlob) -> Result<String, GenerateError> {
    let encoded = blob.base64.trim();
    if encoded.is_empty() {
        return Err(GenerateError::malformed(Stage::Image, "image blob is empty"));
    }

    let b64 = base64::engine::general_purpose::STANDARD;
    let decoded = b64
        .decode(encoded)
        .map_err(|e| GenerateError::malformed(Stage::Image, format!("invalid image base64: {e}")))?;
    if decoded.is_empty() {
        return Err(GenerateError::malformed(Stage::Image, "image blob decodes to nothing"));
    }

    let mime = blob.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME);
    if !mime.starts_with("image/") {
        return Err(GenerateError::malformed(
            Stage::Image,
            format!("unexpected MIME type {mime}"),
        ));
    }

    Ok(format!("data:{mime};base64,{encoded}"))
}
